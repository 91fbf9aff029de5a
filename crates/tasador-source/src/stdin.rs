//! Standard input reader.

use tokio::io::AsyncReadExt;

use crate::Result;

/// Read standard input to the end.
///
/// # Errors
///
/// Returns an error if the stream cannot be read or is not UTF-8.
pub async fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    tokio::io::stdin().read_to_string(&mut buffer).await?;
    Ok(buffer)
}
