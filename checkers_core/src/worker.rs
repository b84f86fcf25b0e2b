use crate::engine::config::EngineConfig;
use crate::engine::search::AlphaBetaEngine;
use crate::engine::{SearchResult, SearchStats};
use crate::logic::board::{Board, Color};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Input {
    ComputeMove {
        board: Board,
        color: Color,
        config: EngineConfig,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Output {
    MoveFound(SearchResult),
    /// Position was already decided for the requesting side.
    NoMove(SearchStats),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkerError {
    #[error("search worker has shut down")]
    Disconnected,
}

/// Runs searches on a background thread so the caller stays responsive.
///
/// Requests are answered in order. The engine is created lazily and reused
/// across requests, with its config swapped per request.
pub struct SearchWorker {
    requests: Option<Sender<Input>>,
    responses: Receiver<Output>,
    handle: Option<JoinHandle<()>>,
}

impl SearchWorker {
    #[must_use]
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<Input>();
        let (response_tx, response_rx) = mpsc::channel::<Output>();

        let handle = thread::spawn(move || {
            let mut engine: Option<AlphaBetaEngine> = None;
            for msg in request_rx {
                let output = handle_input(&mut engine, msg);
                if response_tx.send(output).is_err() {
                    break;
                }
            }
            log::trace!("search worker exiting");
        });

        Self {
            requests: Some(request_tx),
            responses: response_rx,
            handle: Some(handle),
        }
    }

    pub fn request(&self, input: Input) -> Result<(), WorkerError> {
        self.requests
            .as_ref()
            .ok_or(WorkerError::Disconnected)?
            .send(input)
            .map_err(|_| WorkerError::Disconnected)
    }

    /// Blocks until the next answer arrives.
    pub fn recv(&self) -> Result<Output, WorkerError> {
        self.responses.recv().map_err(|_| WorkerError::Disconnected)
    }

    /// Convenience round trip for a single position.
    pub fn compute(
        &self,
        board: Board,
        color: Color,
        config: EngineConfig,
    ) -> Result<Output, WorkerError> {
        self.request(Input::ComputeMove {
            board,
            color,
            config,
        })?;
        self.recv()
    }
}

fn handle_input(engine: &mut Option<AlphaBetaEngine>, msg: Input) -> Output {
    match msg {
        Input::ComputeMove {
            board,
            color,
            config,
        } => {
            let engine =
                engine.get_or_insert_with(|| AlphaBetaEngine::new(Arc::new(config.clone())));
            if *engine.config() != config {
                engine.update_config(Arc::new(config));
            }

            let result = engine.best_move(&board, color);
            if result.action.is_some() {
                Output::MoveFound(result)
            } else {
                Output::NoMove(result.stats)
            }
        }
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("search worker panicked");
            }
        }
    }
}
