use clap::{Args, Subcommand};

use drivefs_daemon::http_server::api::client::ApiError;
use drivefs_daemon::http_server::api::v0::fs::{
    CreateRequest, DeleteRequest, DrivesRequest, ListRequest, MoveRequest, ReadRequest,
    StatRequest, WriteRequest,
};

use crate::cli::op::{Op, OpContext};

crate::command_enum! {
    (Create, CreateRequest),
    (Rm, DeleteRequest),
    (Mv, MoveRequest),
    (Write, WriteRequest),
    (Cat, ReadRequest),
    (Ls, ListRequest),
    (Drives, DrivesRequest),
    (Stat, StatRequest),
}

// Rename the generated Command to FsCommand for clarity
pub type FsCommand = Command;

/// Operate on the daemon's namespace
#[derive(Args, Debug, Clone)]
pub struct Fs {
    #[command(subcommand)]
    pub command: FsCommand,
}

#[async_trait::async_trait]
impl Op for Fs {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

#[async_trait::async_trait]
impl Op for CreateRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response = client.call(self.clone()).await?;
        Ok(response.message)
    }
}

#[async_trait::async_trait]
impl Op for DeleteRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response = client.call(self.clone()).await?;
        Ok(response.message)
    }
}

#[async_trait::async_trait]
impl Op for MoveRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response = client.call(self.clone()).await?;
        Ok(response.message)
    }
}

#[async_trait::async_trait]
impl Op for WriteRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response = client.call(self.clone()).await?;
        Ok(format!("{} ({} bytes)", response.message, response.size))
    }
}

#[async_trait::async_trait]
impl Op for ReadRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response = client.call(self.clone()).await?;
        Ok(response.content)
    }
}

#[async_trait::async_trait]
impl Op for ListRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response = client.call(self.clone()).await?;

        if response.items.is_empty() {
            return Ok("No items found".to_string());
        }
        let output = response
            .items
            .iter()
            .map(|item| format!("{} ({})", item.name, item.entity_type))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(output)
    }
}

#[async_trait::async_trait]
impl Op for DrivesRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response = client.call(self.clone()).await?;

        if response.drives.is_empty() {
            return Ok("No drives".to_string());
        }
        Ok(response.drives.join("\n"))
    }
}

#[async_trait::async_trait]
impl Op for StatRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let stat = client.call(self.clone()).await?;

        let mut lines = vec![
            format!("name:     {}", stat.name),
            format!("type:     {}", stat.kind),
            format!("created:  {}", stat.created_at),
            format!("updated:  {}", stat.updated_at),
        ];
        if let Some(size) = stat.size {
            lines.push(format!("size:     {} bytes", size));
        }
        if let Some(mime) = stat.mime_type {
            lines.push(format!("mime:     {}", mime));
        }
        if let Some(children) = stat.children {
            lines.push(format!("children: {}", children));
        }
        Ok(lines.join("\n"))
    }
}
