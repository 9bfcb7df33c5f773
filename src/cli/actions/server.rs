use crate::cli::actions::Action;
use crate::conserje::new;
use anyhow::Result;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            cors_origin,
        } => {
            new(port, dsn, &cors_origin).await?;
        }
    }

    Ok(())
}
