//! Loft demo - micro-app lifecycle walkthrough
//!
//! Wires the host up with the in-memory environment, registers three demo
//! apps, starts the auto-route driver, and navigates through their zones.

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use loft_host::{
    Bundle, Container, InMemoryContainerHost, ManualNavigation, MicroApp, MicroAppHost,
    StaticAssetLoader,
};
use loft_types::{ActiveRule, BoxError, MicroAppConfig, Props};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Loft demo CLI
#[derive(Parser)]
#[command(name = "loft-demo")]
#[command(about = "Loft demo - micro-app lifecycle walkthrough", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level
    #[arg(long, env = "LOFT_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Milliseconds to let the route driver settle after each navigation
    #[arg(long, default_value_t = 50)]
    settle_ms: u64,
}

/// Demo app rendering a title card into its container.
#[derive(Debug)]
struct DemoApp {
    title: &'static str,
}

#[async_trait]
impl MicroApp for DemoApp {
    async fn mount(
        &self,
        container: Arc<dyn Container>,
        props: Props,
    ) -> std::result::Result<(), BoxError> {
        container.render(&format!("<h1>{}</h1>", self.title));
        if let Some(theme) = props.get("theme") {
            container.render(&format!("<style data-theme={theme}></style>"));
        }
        info!(app = self.title, "demo app mounted");
        Ok(())
    }

    async fn unmount(&self) -> std::result::Result<(), BoxError> {
        info!(app = self.title, "demo app unmounted");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let containers = Arc::new(InMemoryContainerHost::new());
    let music = containers.add("#music-container");
    let user = containers.add("#user-container");
    let admin = containers.add("#admin-container");

    let loader = StaticAssetLoader::new()
        .with_bundle(
            "http://localhost:3001",
            Bundle::new().with_export(
                "music-player",
                Arc::new(DemoApp {
                    title: "Music Player",
                }),
            ),
        )
        .with_bundle(
            "http://localhost:3002",
            Bundle::new().with_export(
                "user-center",
                Arc::new(DemoApp {
                    title: "User Center",
                }),
            ),
        )
        .with_bundle(
            "http://localhost:3003",
            Bundle::new().with_export(
                "admin-panel",
                Arc::new(DemoApp {
                    title: "Admin Panel",
                }),
            ),
        );

    let nav = Arc::new(ManualNavigation::new("/"));
    let host = Arc::new(MicroAppHost::new(
        Arc::new(loader),
        containers.clone(),
        nav.clone(),
    ));

    host.register_apps([
        MicroAppConfig::new("music-player", "http://localhost:3001")
            .with_container("#music-container")
            .with_active_rule("/music")
            .with_props(Props::new().with("theme", "dark")),
        MicroAppConfig::new("user-center", "http://localhost:3002")
            .with_container("#user-container")
            .with_active_rule("/user")
            .with_props(Props::new().with("theme", "light")),
        MicroAppConfig::new("admin-panel", "http://localhost:3003")
            .with_container("#admin-container")
            .with_active_rule(ActiveRule::predicate(|path| {
                path.starts_with("/admin") || path.starts_with("/console")
            })),
    ])
    .await;

    let _driver = Arc::clone(&host).start_auto_route();

    for path in ["/music/player", "/user/profile", "/console/admin", "/about"] {
        nav.navigate(path);
        tokio::time::sleep(Duration::from_millis(cli.settle_ms)).await;
        let current = host.current_app().await;
        info!(path, ?current, "navigated");
    }

    // Manual mount with a call-time props override.
    host.mount_app("music-player", Props::new().with("theme", "light"))
        .await?;

    for (label, handle) in [("music", &music), ("user", &user), ("admin", &admin)] {
        info!(container = label, content = ?handle.content(), "final container state");
    }

    for snapshot in host.apps().await {
        info!(
            app = %snapshot.name,
            loaded = snapshot.loaded,
            mounted = snapshot.mounted,
            "final app state"
        );
    }

    Ok(())
}
