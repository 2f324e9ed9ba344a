use dashmap::DashMap;
use tonic::{Request, Response, Status};
use uuid::Uuid;

use crate::{
    config::GLOBAL_CONFIG,
    models::{
        auth_models::{AuthError, LoginPayload, SignupPayload},
        session_models::{PracticeSession, SessionError},
        submission_models::{JudgeError, SubmissionKind},
    },
    proto::practice::{
        AuthResponse, LoginRequest, SessionStatusRequest, SessionStatusResponse, SignupRequest,
        StartSessionRequest, StartSessionResponse, SubmissionCall, SubmissionResult,
    },
    proto::practice::practice_gateway_server::PracticeGateway,
    services::{
        auth_services::auth_service::AuthClient,
        execution_services::judge_client_service::{HttpJudgeClient, JudgeDispatch},
        session_services::{session_cache_service::SessionCache, session_timer_service},
        validation_services::validation_service::ValidationService,
    },
};

pub const USER_ID: &str = "user_id";
pub const ANONYMOUS: &str = "anonymous";

pub struct PracticeGatewayService {
    auth: AuthClient,
    judge: HttpJudgeClient,
    in_flight: DashMap<String, ()>,
}

impl PracticeGatewayService {
    pub fn from_config() -> Self {
        PracticeGatewayService {
            auth: AuthClient::from_config(),
            judge: HttpJudgeClient::from_config(),
            in_flight: DashMap::new(),
        }
    }

    fn authenticated_user<T>(request: &Request<T>) -> Result<String, Status> {
        let user_id = request
            .metadata()
            .get(USER_ID)
            .and_then(|v: &tonic::metadata::MetadataValue<tonic::metadata::Ascii>| v.to_str().ok())
            .unwrap_or(ANONYMOUS)
            .to_string();

        if user_id == ANONYMOUS {
            return Err(Status::unauthenticated(
                "User ID is required for a practice session.",
            ));
        }
        Ok(user_id)
    }

    /// Shared Run/Submit path. A session gets one submission in flight at a
    /// time; a second call while one is pending is rejected.
    async fn handle_submission(
        &self,
        session_id: &str,
        kind: SubmissionKind,
    ) -> Result<SubmissionResult, Status> {
        ValidationService::validate_session_id(session_id)
            .map_err(|e| Status::invalid_argument(e.to_message()))?;

        if self.in_flight.insert(session_id.to_string(), ()).is_some() {
            return Err(Status::aborted(
                SessionError::SubmissionInFlight(session_id.to_string()).message(),
            ));
        }
        let result = self.dispatch_submission(session_id, kind).await;
        self.in_flight.remove(session_id);
        result
    }

    async fn dispatch_submission(
        &self,
        session_id: &str,
        kind: SubmissionKind,
    ) -> Result<SubmissionResult, Status> {
        let cache = SessionCache::new();
        let request = {
            let session = cache.get_session(session_id).ok_or_else(|| {
                Status::not_found(SessionError::NotFound(session_id.to_string()).message())
            })?;
            session.prepare_submission(kind).map_err(session_status)?
        };
        ValidationService::validate_submission_code(request.get_code())
            .map_err(|e| Status::invalid_argument(e.to_message()))?;

        println!(
            "Dispatching {} for session {}",
            request.get_kind().as_str(),
            session_id
        );
        match self.judge.dispatch(&request).await {
            Ok(verdict) => {
                let remaining_ms = cache
                    .get_session(session_id)
                    .map(|session| session.remaining_ms)
                    .unwrap_or(0);
                println!("Judge verdict for session {}: {}", session_id, verdict.output);
                Ok(SubmissionResult {
                    passed: verdict.passed,
                    output: verdict.output,
                    remaining_ms,
                })
            }
            Err(error) => {
                eprintln!("Judge dispatch failed for session {}: {}", session_id, error);
                Err(judge_status(error))
            }
        }
    }
}

#[tonic::async_trait]
impl PracticeGateway for PracticeGatewayService {
    async fn signup(
        &self,
        request: Request<SignupRequest>,
    ) -> Result<Response<AuthResponse>, Status> {
        let data = request.into_inner();
        let payload = SignupPayload {
            username: data.username,
            name: data.name,
            email: data.email,
            password: data.password,
        };
        match self.auth.signup(&payload).await {
            Ok(context) => Ok(Response::new(AuthResponse {
                user_id: context.user_id,
                token: context.token.unwrap_or_default(),
            })),
            Err(error) => Err(auth_status(error)),
        }
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<AuthResponse>, Status> {
        let data = request.into_inner();
        let payload = LoginPayload {
            email: data.email,
            password: data.password,
        };
        match self.auth.login(&payload).await {
            Ok(context) => Ok(Response::new(AuthResponse {
                user_id: context.user_id,
                token: context.token.unwrap_or_default(),
            })),
            Err(error) => Err(auth_status(error)),
        }
    }

    async fn start_session(
        &self,
        request: Request<StartSessionRequest>,
    ) -> Result<Response<StartSessionResponse>, Status> {
        let user_id = Self::authenticated_user(&request)?;
        let data = request.into_inner();
        let language = ValidationService::validate_start_request(&data.problem_id, &data.language)
            .map_err(|e| Status::invalid_argument(e.to_message()))?;

        let config = GLOBAL_CONFIG.get().unwrap();
        let cache = SessionCache::new();
        if cache.session_count() >= config.session_configs.max_sessions {
            return Err(Status::resource_exhausted("Session limit reached"));
        }

        let session = PracticeSession::new(
            Uuid::new_v4().to_string(),
            user_id,
            data.problem_id,
            language,
            config.session_configs.time_budget_ms,
        );
        let session_id = session.session_id.clone();
        let remaining_ms = session.remaining_ms;
        println!(
            "Started session {} for problem {} ({})",
            session_id, session.problem_id, session.language
        );
        cache.insert_session(session);
        session_timer_service::spawn_session_timer(
            session_id.clone(),
            config.session_configs.tick_period_ms,
        );

        Ok(Response::new(StartSessionResponse {
            session_id,
            remaining_ms,
        }))
    }

    async fn session_status(
        &self,
        request: Request<SessionStatusRequest>,
    ) -> Result<Response<SessionStatusResponse>, Status> {
        let data = request.into_inner();
        let cache = SessionCache::new();
        match cache.get_session(&data.session_id) {
            Some(session) => Ok(Response::new(SessionStatusResponse {
                remaining_ms: session.remaining_ms,
                status: session.status.as_str().to_string(),
                language: session.language.as_str().to_string(),
            })),
            None => Err(Status::not_found(
                SessionError::NotFound(data.session_id).message(),
            )),
        }
    }

    async fn run(
        &self,
        request: Request<SubmissionCall>,
    ) -> Result<Response<SubmissionResult>, Status> {
        let data = request.into_inner();
        self.handle_submission(&data.session_id, SubmissionKind::Run)
            .await
            .map(Response::new)
    }

    async fn submit(
        &self,
        request: Request<SubmissionCall>,
    ) -> Result<Response<SubmissionResult>, Status> {
        let data = request.into_inner();
        self.handle_submission(&data.session_id, SubmissionKind::Submit)
            .await
            .map(Response::new)
    }
}

fn session_status(error: SessionError) -> Status {
    match &error {
        SessionError::NotFound(_) => Status::not_found(error.message()),
        SessionError::Expired(_) => Status::failed_precondition(error.message()),
        SessionError::InvalidLanguage(_) => Status::invalid_argument(error.message()),
        SessionError::SubmissionInFlight(_) => Status::aborted(error.message()),
        SessionError::Unauthenticated(_) => Status::unauthenticated(error.message()),
    }
}

fn judge_status(error: JudgeError) -> Status {
    match &error {
        JudgeError::Timeout => Status::deadline_exceeded(error.message()),
        JudgeError::TransientNetwork(_) => Status::unavailable(error.message()),
        JudgeError::Rejected(_) => Status::invalid_argument(error.message()),
    }
}

fn auth_status(error: AuthError) -> Status {
    match &error {
        AuthError::Network(_) => Status::unavailable(error.message()),
        AuthError::Rejected(_) => Status::unauthenticated(error.message()),
    }
}
