//! Basic example demonstrating the v2 API client.
//!
//! Run with:
//! ```
//! cargo run --example basic -- fcoury
//! ```
//!
//! Set `OCTOPI_LOGIN` and `OCTOPI_TOKEN` to also list your SSH keys.

use octopi::{ApiClient, Resolution, User};

#[tokio::main]
async fn main() -> octopi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let login = std::env::args().nth(1).unwrap_or_else(|| "fcoury".to_string());

    // Create client from environment variables
    let client = ApiClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    println!("\n--- User ---");
    let user = User::find(&client, &login).await?;
    println!("{} ({})", user, user.name.as_deref().unwrap_or("no name"));
    if let Some(created_at) = user.created_at {
        println!("  Member since {}", created_at.format("%Y-%m-%d"));
    }

    println!("\n--- Repositories ---");
    let repos = user.repositories(&client).await?;
    for repo in repos.iter().take(10) {
        println!(
            "  {} - {}",
            repo,
            repo.description.as_deref().unwrap_or("(no description)")
        );
    }

    if let Some(repo) = repos.iter().next() {
        println!("\n--- Tags of {} ---", repo);
        for tag in repo.tags(&client).await? {
            println!("  {} -> {}", tag.name, tag.hash);
        }
    }

    println!("\n--- Followers ---");
    let followers = user.followers(&client).await?;
    println!("  {}", followers.join(", "));

    println!("\n--- Following (resolved) ---");
    let following = user
        .following_deep(&client, Resolution::Concurrent { limit: 4 })
        .await?;
    for followed in &following {
        println!(
            "  {} has {} public repositories",
            followed,
            followed.public_repo_count.unwrap_or(0)
        );
    }

    if client.login() == Some(login.as_str()) {
        println!("\n--- Keys ---");
        for key in user.keys(&client).await? {
            println!("  #{} {}", key.id, key.title);
        }
    }

    println!("\nDone!");
    Ok(())
}
