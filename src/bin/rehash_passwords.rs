//! Replaces legacy plaintext values in `Users.password` with argon2 hashes.
//!
//! Login only accepts hashed passwords, so run this once against a database
//! that was seeded with plaintext credentials.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use futures::{TryStreamExt, future};
use sqlx::mysql::MySqlPoolOptions;
use tracing::info;

use payroll_server::auth::password::{hash_password, is_password_hash};

#[derive(Parser)]
#[command(name = "rehash-passwords", about = "Hash plaintext passwords in the Users table")]
struct Cli {
    /// MySQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Only report how many rows would change
    #[arg(long)]
    dry_run: bool,
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .connect(&cli.database_url)
        .await
        .context("Failed to connect to database")?;

    let legacy: Vec<(i32, String)> =
        sqlx::query_as::<_, (i32, String)>("SELECT user_id, password FROM Users")
            .fetch(&pool)
            .try_filter(|(_, password)| future::ready(!is_password_hash(password)))
            .try_collect()
            .await
            .context("Failed to read Users")?;

    info!(rows = legacy.len(), "Found plaintext passwords");
    if cli.dry_run || legacy.is_empty() {
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    for (user_id, plaintext) in &legacy {
        let hashed = hash_password(plaintext)
            .map_err(|e| anyhow!("Failed to hash password for user {user_id}: {e}"))?;

        sqlx::query("UPDATE Users SET password = ? WHERE user_id = ?")
            .bind(hashed)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to update user {user_id}"))?;
    }
    tx.commit().await?;

    info!(rows = legacy.len(), "Passwords rehashed");
    Ok(())
}
