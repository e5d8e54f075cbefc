//! Megaverse replay orchestration
//!
//! Dispatches translated commands to the transport client, strictly in
//! order: each creation completes (including any rate-limit retries) before
//! the next is issued. The first failure aborts the whole sequence.

use crate::map::{AstralObject, Command};
use async_trait::async_trait;
use megaverse_api::{ApiError, MegaverseApi};

/// Seam between translation and transport.
///
/// Implemented by [`MegaverseApi`] for real submission; tests substitute
/// recording or failing doubles.
#[async_trait]
pub trait ObjectCreator {
    /// Create a POLYANET at the given coordinates
    async fn create_polyanet(&self, row: usize, column: usize) -> Result<(), ApiError>;

    /// Create a SOLOON at the given coordinates
    async fn create_soloon(&self, row: usize, column: usize, color: &str)
        -> Result<(), ApiError>;

    /// Create a COMETH at the given coordinates
    async fn create_cometh(
        &self,
        row: usize,
        column: usize,
        direction: &str,
    ) -> Result<(), ApiError>;
}

#[async_trait]
impl ObjectCreator for MegaverseApi {
    async fn create_polyanet(&self, row: usize, column: usize) -> Result<(), ApiError> {
        Self::create_polyanet(self, row, column).await
    }

    async fn create_soloon(
        &self,
        row: usize,
        column: usize,
        color: &str,
    ) -> Result<(), ApiError> {
        Self::create_soloon(self, row, column, color).await
    }

    async fn create_cometh(
        &self,
        row: usize,
        column: usize,
        direction: &str,
    ) -> Result<(), ApiError> {
        Self::create_cometh(self, row, column, direction).await
    }
}

/// Sequential replayer for a translated goal map
#[derive(Debug)]
pub struct Megaverse<C> {
    /// Transport used for each creation call
    creator: C,
}

impl<C: ObjectCreator> Megaverse<C> {
    /// Create a replayer over the given transport
    #[inline]
    #[must_use]
    pub fn new(creator: C) -> Self {
        Self { creator }
    }

    /// Replay every command in order, waiting for each to complete.
    ///
    /// # Errors
    /// Propagates the first creation failure; remaining commands are not
    /// submitted.
    pub async fn create(&self, commands: &[Command]) -> Result<(), ApiError> {
        for (index, command) in commands.iter().enumerate() {
            tracing::debug!(
                index,
                total = commands.len(),
                row = command.row,
                column = command.column,
                kind = command.object.kind(),
                "creating object"
            );
            let result = match &command.object {
                AstralObject::Polyanet => {
                    self.creator.create_polyanet(command.row, command.column).await
                }
                AstralObject::Soloon { color } => {
                    self.creator
                        .create_soloon(command.row, command.column, color)
                        .await
                }
                AstralObject::Cometh { direction } => {
                    self.creator
                        .create_cometh(command.row, command.column, direction)
                        .await
                }
            };
            if let Err(e) = result {
                tracing::error!(
                    index,
                    row = command.row,
                    column = command.column,
                    "creation failed: {e}"
                );
                return Err(e);
            }
        }
        tracing::info!(objects = commands.len(), "megaverse created");
        Ok(())
    }
}
