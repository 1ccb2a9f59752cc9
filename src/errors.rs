use thiserror::Error;

#[derive(Debug, Error)]
pub enum ElectroMeteoError {
    #[error("Request was considered invalid due to error: {0}")]
    InvalidRequest(#[from] RequestError),
    #[error("Could not read input data: {0}")]
    Ingestion(anyhow::Error),
    #[error("Could not write output: {0}")]
    Output(anyhow::Error),
}

/// Reasons an aggregation request is rejected before any work is done.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RequestError {
    #[error("Le paramètre '{field}' est obligatoire et ne peut pas être vide.")]
    BlankCode { field: &'static str },
    #[error("Format de date invalide pour '{field}' : '{value}'. Format attendu : yyyy-MM-dd (ex: {example}).")]
    InvalidDate {
        field: &'static str,
        value: String,
        example: &'static str,
    },
    #[error("La date de début ({start}) doit être antérieure ou égale à la date de fin ({end}).")]
    StartAfterEnd { start: String, end: String },
}
