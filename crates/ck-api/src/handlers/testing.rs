//! Hand-rolled endpoint test doubles

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ck_ai::avatar::VideoRequest;
use ck_ai::speech::VoiceSettings;
use ck_core::error::{CkError, CkResult};
use ck_core::traits::Id;
use ck_db::{
    MemberRow, NudgeStore, ProjectRow, ProjectStore, RepositoryError, RepositoryResult, TaskRow,
    VideoStore,
};
use ck_models::{CreateProjectInput, GeneratedVideo, MemberInput, ProjectPatch, TaskInput, TaskPatch};
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::state::{AppState, SpeechBackend, VideoBackend};

fn simulated() -> RepositoryError {
    RepositoryError::Database(sqlx::Error::PoolClosed)
}

/// Read-only project store stub; the endpoints never write through it
#[derive(Default)]
pub(crate) struct StubProjectStore {
    pub rows: Mutex<Vec<ProjectRow>>,
    pub members: Mutex<Vec<MemberRow>>,
    pub tasks: Mutex<Vec<TaskRow>>,
    pub fail_query: AtomicBool,
}

impl StubProjectStore {
    pub fn seed_project(&self) -> Id {
        let id = Uuid::new_v4();
        self.rows.lock().unwrap().push(ProjectRow {
            id,
            title: "Capstone".into(),
            description: Some("Group project".into()),
            created_by: Uuid::new_v4(),
            phases: None,
            current_phase: Some("Development".into()),
            deadline: None,
            status: None,
            created_at: Some(Utc::now()),
        });
        id
    }

    pub fn seed_task(&self, project_id: Id, status: &str) {
        self.tasks.lock().unwrap().push(TaskRow {
            id: Uuid::new_v4(),
            project_id,
            title: "Task".into(),
            description: None,
            assigned_to: None,
            status: Some(status.into()),
            tags: None,
            deadline: None,
            hours_logged: Some(3),
            priority: None,
        });
    }
}

#[async_trait]
impl ProjectStore for StubProjectStore {
    async fn projects_owned_by(&self, owner_id: Id) -> RepositoryResult<Vec<ProjectRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.created_by == owner_id)
            .cloned()
            .collect())
    }

    async fn member_project_ids(&self, _user_id: Id) -> RepositoryResult<Vec<Id>> {
        Ok(vec![])
    }

    async fn projects_by_ids(&self, ids: &[Id]) -> RepositoryResult<Vec<ProjectRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect())
    }

    async fn find_project(&self, id: Id) -> RepositoryResult<Option<ProjectRow>> {
        if self.fail_query.load(Ordering::SeqCst) {
            return Err(simulated());
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn members_of(&self, project_id: Id) -> RepositoryResult<Vec<MemberRow>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn tasks_of(&self, project_id: Id) -> RepositoryResult<Vec<TaskRow>> {
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn insert_project(
        &self,
        _owner_id: Id,
        _input: &CreateProjectInput,
    ) -> RepositoryResult<ProjectRow> {
        Err(simulated())
    }

    async fn insert_members(
        &self,
        _project_id: Id,
        _members: &[MemberInput],
    ) -> RepositoryResult<()> {
        Err(simulated())
    }

    async fn insert_task(&self, _project_id: Id, _input: &TaskInput) -> RepositoryResult<TaskRow> {
        Err(simulated())
    }

    async fn update_project(&self, _id: Id, _patch: &ProjectPatch) -> RepositoryResult<()> {
        Err(simulated())
    }

    async fn update_task(&self, _task_id: Id, _patch: &TaskPatch) -> RepositoryResult<()> {
        Err(simulated())
    }

    async fn delete_project(&self, _id: Id) -> RepositoryResult<()> {
        Err(simulated())
    }
}

#[derive(Default)]
pub(crate) struct StubNudgeStore {
    pub fail: bool,
    rows: Mutex<Vec<(Id, String, String)>>,
}

impl StubNudgeStore {
    pub fn recorded(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl NudgeStore for StubNudgeStore {
    async fn insert_nudge(
        &self,
        project_id: Id,
        _user_id: Id,
        nudge_type: &str,
        message: &str,
        _voice_url: &str,
    ) -> RepositoryResult<Id> {
        if self.fail {
            return Err(simulated());
        }
        self.rows
            .lock()
            .unwrap()
            .push((project_id, nudge_type.into(), message.into()));
        Ok(Uuid::new_v4())
    }
}

#[derive(Default)]
pub(crate) struct StubVideoStore {
    pub fail: bool,
    rows: Mutex<Vec<GeneratedVideo>>,
}

impl StubVideoStore {
    pub fn recorded(&self) -> Vec<GeneratedVideo> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoStore for StubVideoStore {
    async fn insert_video(
        &self,
        project_id: Id,
        user_id: Option<Id>,
        video_url: &str,
        script: &str,
    ) -> RepositoryResult<GeneratedVideo> {
        if self.fail {
            return Err(simulated());
        }
        let video = GeneratedVideo {
            id: Uuid::new_v4(),
            project_id,
            user_id,
            video_url: video_url.into(),
            script: script.into(),
            generation_status: "completed".into(),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(video.clone());
        Ok(video)
    }

    async fn videos_of(&self, project_id: Id) -> RepositoryResult<Vec<GeneratedVideo>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn delete_video(&self, id: Id) -> RepositoryResult<()> {
        self.rows.lock().unwrap().retain(|v| v.id != id);
        Ok(())
    }
}

pub(crate) struct StubVideoBackend {
    pub fail: bool,
    pub url: String,
    pub last_request: Mutex<Option<VideoRequest>>,
}

impl Default for StubVideoBackend {
    fn default() -> Self {
        Self {
            fail: false,
            url: "https://videos.example/summary.mp4".into(),
            last_request: Mutex::new(None),
        }
    }
}

#[async_trait]
impl VideoBackend for StubVideoBackend {
    async fn generate(
        &self,
        request: &VideoRequest,
        _cancel: &CancellationToken,
    ) -> CkResult<String> {
        *self.last_request.lock().unwrap() = Some(request.clone());
        if self.fail {
            return Err(CkError::Internal(
                "Video generation failed on the avatar service side".into(),
            ));
        }
        Ok(self.url.clone())
    }
}

#[derive(Default)]
pub(crate) struct StubSpeechBackend {
    pub configured: bool,
    pub fail: bool,
}

#[async_trait]
impl SpeechBackend for StubSpeechBackend {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn synthesize(&self, _text: &str, _settings: VoiceSettings) -> CkResult<Vec<u8>> {
        if self.fail {
            return Err(CkError::external("ElevenLabs", 500, "unavailable"));
        }
        Ok(vec![0u8; 16])
    }
}

/// Mutable stub configuration handed to the `state_with` closure
#[derive(Default)]
pub(crate) struct StubConfig {
    pub projects: StubProjectStore,
    pub nudges: StubNudgeStore,
    pub videos: StubVideoStore,
    pub video_backend: StubVideoBackend,
    pub speech: StubSpeechBackend,
}

pub(crate) struct TestState {
    pub state: AppState,
    pub projects: Arc<StubProjectStore>,
    pub nudges: Arc<StubNudgeStore>,
    pub videos: Arc<StubVideoStore>,
    pub video_backend: Arc<StubVideoBackend>,
}

/// Build an AppState over stubs, letting the caller adjust them first
pub(crate) fn state_with(configure: impl FnOnce(&mut StubConfig)) -> TestState {
    let mut config = StubConfig::default();
    configure(&mut config);

    let projects = Arc::new(config.projects);
    let nudges = Arc::new(config.nudges);
    let videos = Arc::new(config.videos);
    let video_backend = Arc::new(config.video_backend);
    let speech = Arc::new(config.speech);

    let state = AppState {
        projects: projects.clone(),
        nudges: nudges.clone(),
        videos: videos.clone(),
        video_backend: video_backend.clone(),
        speech_backend: speech,
    };

    TestState {
        state,
        projects,
        nudges,
        videos,
        video_backend,
    }
}
