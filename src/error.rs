use thiserror::Error;

/// Every failure the UI can surface. Each variant maps to one short Spanish
/// message through [`AppError::user_message`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("username or password is blank")]
    MissingCredentials,
    #[error("could not reach the attendance server: {0}")]
    Connectivity(String),
    #[error("no account matches the given credentials")]
    InvalidCredentials,
    #[error("no active session")]
    NoSession,
    #[error("failed to load attendance records: {0}")]
    FetchFailed(String),
    #[error("challenge digits do not match the stored id")]
    ChallengeMismatch,
    #[error("attendance submission failed: {0}")]
    Submission(String),
    #[error("an attendance submission is already in progress")]
    SubmissionInFlight,
    #[error("session storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::MissingCredentials => "Ingresa usuario y contraseña.".into(),
            AppError::Connectivity(_) => "Error de conexión. Intenta nuevamente.".into(),
            AppError::InvalidCredentials => "Usuario o contraseña incorrectos.".into(),
            AppError::NoSession => "No hay una sesión activa.".into(),
            AppError::FetchFailed(_) => "Error cargando registros".into(),
            AppError::ChallengeMismatch => "Los dígitos no coinciden con la cédula".into(),
            AppError::Submission(_) => "Error registrando asistencia".into(),
            AppError::SubmissionInFlight => "Ya se está registrando la asistencia.".into(),
            AppError::Storage(_) => "No se pudo guardar la sesión.".into(),
        }
    }
}

impl From<AppError> for String {
    fn from(err: AppError) -> Self {
        err.user_message()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_and_credentials_have_distinct_messages() {
        let offline = AppError::Connectivity("timeout".into()).user_message();
        let mismatch = AppError::InvalidCredentials.user_message();
        assert_ne!(offline, mismatch);
        assert_eq!(mismatch, "Usuario o contraseña incorrectos.");
    }

    #[test]
    fn converts_into_command_error_string() {
        let message: String = AppError::ChallengeMismatch.into();
        assert_eq!(message, "Los dígitos no coinciden con la cédula");
    }
}
