//! Runs embedded `PostgreSQL` lifecycle steps on behalf of a root test runner.
//!
//! ```text
//! pg_worker <setup|start|stop> <payload.json>
//! ```
//!
//! `initdb` refuses to run as root, so the integration test harness delegates
//! cluster setup to this binary. The payload is a serialised
//! [`WorkerPayload`] carrying the cluster settings and environment overrides.
//! When started as root the worker switches to `nobody` before touching the
//! cluster.

#[cfg(unix)]
use camino::{Utf8Path, Utf8PathBuf};
#[cfg(unix)]
use nix::unistd::{Uid, User, initgroups, setgid, setuid};
#[cfg(unix)]
use pg_embedded_setup_unpriv::ambient_dir_and_path;
#[cfg(unix)]
use pg_embedded_setup_unpriv::worker::{PlainSecret, WorkerPayload};
#[cfg(unix)]
use postgresql_embedded::{PostgreSQL, Status};
#[cfg(unix)]
use std::ffi::CString;
#[cfg(unix)]
use std::io::Read;
#[cfg(unix)]
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[cfg(unix)]
const UNPRIVILEGED_USER: &str = "nobody";

#[cfg(unix)]
#[derive(Debug, Error)]
enum WorkerError {
    #[error("usage: pg_worker <setup|start|stop> <payload.json>: {0}")]
    Usage(String),
    #[error("failed to read payload: {0}")]
    Payload(#[source] BoxError),
    #[error("failed to parse payload: {0}")]
    PayloadFormat(#[source] serde_json::Error),
    #[error("invalid cluster settings: {0}")]
    Settings(String),
    #[error("failed to build runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to switch to {UNPRIVILEGED_USER}: {0}")]
    Demotion(String),
    #[error("cluster {operation} failed: {message}")]
    Cluster {
        operation: &'static str,
        message: String,
    },
}

#[cfg(unix)]
#[derive(Debug, Clone, Copy)]
enum Step {
    Setup,
    Start,
    Stop,
}

#[cfg(unix)]
impl Step {
    fn parse(arg: &str) -> Result<Self, WorkerError> {
        match arg {
            "setup" => Ok(Self::Setup),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            other => Err(WorkerError::Usage(format!("unknown step '{other}'"))),
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

#[cfg(unix)]
fn main() -> Result<(), BoxError> {
    let (step, payload_path) = parse_args(std::env::args())?;
    let payload = load_payload(&payload_path)?;
    demote_if_root()?;
    let settings = payload
        .settings
        .into_settings()
        .map_err(|err| WorkerError::Settings(err.to_string()))?;
    apply_environment(&payload.environment);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(WorkerError::Runtime)?;
    let mut postgres = PostgreSQL::new(settings);
    runtime.block_on(run_step(step, &mut postgres))?;
    if matches!(step, Step::Setup | Step::Start) {
        // Dropping the handle would stop the server this step just started.
        std::mem::forget(postgres);
    }
    Ok(())
}

#[cfg(unix)]
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<(Step, Utf8PathBuf), WorkerError> {
    let _program = args.next();
    let step = args
        .next()
        .ok_or_else(|| WorkerError::Usage("missing step".to_owned()))
        .and_then(|arg| Step::parse(&arg))?;
    let payload_path = args
        .next()
        .map(Utf8PathBuf::from)
        .ok_or_else(|| WorkerError::Usage("missing payload path".to_owned()))?;
    if let Some(extra) = args.next() {
        return Err(WorkerError::Usage(format!("unexpected argument '{extra}'")));
    }
    Ok((step, payload_path))
}

#[cfg(unix)]
fn load_payload(path: &Utf8Path) -> Result<WorkerPayload, WorkerError> {
    let bytes = read_payload(path).map_err(WorkerError::Payload)?;
    serde_json::from_slice(&bytes).map_err(WorkerError::PayloadFormat)
}

#[cfg(unix)]
fn read_payload(path: &Utf8Path) -> Result<Vec<u8>, BoxError> {
    let (dir, relative) = ambient_dir_and_path(path)?;
    let mut file = dir.open(relative.as_std_path())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

#[cfg(unix)]
fn demote_if_root() -> Result<(), WorkerError> {
    if !Uid::effective().is_root() {
        return Ok(());
    }
    let user = User::from_name(UNPRIVILEGED_USER)
        .map_err(|err| WorkerError::Demotion(err.to_string()))?
        .ok_or_else(|| WorkerError::Demotion("user does not exist".to_owned()))?;
    let name = CString::new(user.name.clone())
        .map_err(|err| WorkerError::Demotion(err.to_string()))?;
    initgroups(&name, user.gid).map_err(|err| WorkerError::Demotion(err.to_string()))?;
    setgid(user.gid).map_err(|err| WorkerError::Demotion(err.to_string()))?;
    setuid(user.uid).map_err(|err| WorkerError::Demotion(err.to_string()))?;

    // SAFETY: no other threads exist yet; the runtime is built afterwards.
    unsafe {
        std::env::set_var("HOME", &user.dir);
        std::env::set_var("USER", &user.name);
        std::env::set_var("LOGNAME", &user.name);
    }
    Ok(())
}

#[cfg(unix)]
fn apply_environment(environment: &[(String, Option<PlainSecret>)]) {
    for (key, value) in environment {
        // SAFETY: no other threads exist yet; the runtime is built afterwards.
        unsafe {
            match value {
                Some(secret) => std::env::set_var(key, secret.expose()),
                None => std::env::remove_var(key),
            }
        }
    }
}

#[cfg(unix)]
async fn run_step(step: Step, postgres: &mut PostgreSQL) -> Result<(), WorkerError> {
    let failed = |err: postgresql_embedded::Error| WorkerError::Cluster {
        operation: step.name(),
        message: err.to_string(),
    };
    match step {
        Step::Setup => {
            postgres.setup().await.map_err(failed)?;
            start_unless_running(postgres).await.map_err(failed)
        }
        Step::Start => start_unless_running(postgres).await.map_err(failed),
        Step::Stop => postgres.stop().await.map_err(failed),
    }
}

#[cfg(unix)]
async fn start_unless_running(postgres: &mut PostgreSQL) -> postgresql_embedded::Result<()> {
    if matches!(postgres.status(), Status::Started) {
        return Ok(());
    }
    postgres.start().await
}

#[cfg(not(unix))]
fn main() -> Result<(), BoxError> {
    Err("pg_worker is only supported on Unix".into())
}
