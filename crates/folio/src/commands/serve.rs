//! Render-on-request server command.

use anyhow::Result;
use folio_server::{PostServer, ServerConfig};

use crate::config::FolioConfig;

/// Run the server.
pub async fn run(file_config: &FolioConfig, port: u16, open: bool) -> Result<()> {
    if !file_config.site.posts.is_dir() {
        anyhow::bail!(
            "Posts directory not found: {}. Run 'folio init' first.",
            file_config.site.posts.display()
        );
    }

    let config = ServerConfig {
        posts_dir: file_config.site.posts.clone(),
        public_dir: file_config.site.public.clone(),
        port,
        open,
        title: file_config.site.title.clone(),
        render: file_config.render.options(),
        ..Default::default()
    };

    PostServer::new(config).start().await?;

    Ok(())
}
