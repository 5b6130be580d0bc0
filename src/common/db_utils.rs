// src/common/db_utils.rs

use std::{future::Future, time::Duration};

use crate::common::error::AppError;

/// Executa uma operação transacional com prazo.
///
/// Se o prazo estourar, o future é descartado (a transação sofre rollback no
/// drop) e o erro vira `AppError::Internal`.
pub(crate) async fn with_deadline<T, F>(deadline: Duration, operation: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    tokio::time::timeout(deadline, operation).await?
}
