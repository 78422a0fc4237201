use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_error, engine_info};
use tokio::runtime::Runtime;
use tokio::sync::mpsc as async_mpsc;

use crate::coordinator::{ChannelEventSink, CoordinatorSettings, RefreshCoordinator};
use crate::gateway::{Gateway, GatewaySettings, ReqwestGateway};
use crate::{ActionKey, EngineError, EngineEvent};

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub gateway: GatewaySettings,
    pub coordinator: CoordinatorSettings,
}

enum EngineCommand {
    StartInitialLoad,
    Trigger(ActionKey),
    ProbeImage(String),
    Shutdown,
}

/// Owns the engine thread. All async work runs there on one current-thread
/// runtime; callers talk to it through commands and read back events.
pub struct EngineHandle {
    cmd_tx: async_mpsc::UnboundedSender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    thread: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let gateway = ReqwestGateway::new(config.gateway)?;
        Self::with_gateway(Arc::new(gateway), config.coordinator)
    }

    pub fn with_gateway(
        gateway: Arc<dyn Gateway>,
        settings: CoordinatorSettings,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build();
        Self::start(runtime, gateway, settings)
    }

    fn start(
        runtime: io::Result<Runtime>,
        gateway: Arc<dyn Gateway>,
        settings: CoordinatorSettings,
    ) -> Result<Self, EngineError> {
        let runtime = runtime.map_err(|err| {
            engine_error!("Failed to start engine runtime: {}", err);
            EngineError::Runtime(err.to_string())
        })?;
        let (cmd_tx, cmd_rx) = async_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();

        let thread = thread::spawn(move || {
            let sink = Arc::new(ChannelEventSink::new(event_tx));
            let coordinator = RefreshCoordinator::new(gateway, sink, settings);
            runtime.block_on(run(coordinator, cmd_rx));
            // Executions still in flight are dropped with the runtime.
            runtime.shutdown_background();
            engine_info!("Engine stopped");
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            thread: Some(thread),
        })
    }

    pub fn start_initial_load(&self) {
        let _ = self.cmd_tx.send(EngineCommand::StartInitialLoad);
    }

    pub fn trigger(&self, key: ActionKey) {
        let _ = self.cmd_tx.send(EngineCommand::Trigger(key));
    }

    pub fn probe_image(&self, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::ProbeImage(url.into()));
    }

    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

async fn run(
    coordinator: RefreshCoordinator,
    mut cmd_rx: async_mpsc::UnboundedReceiver<EngineCommand>,
) {
    while let Some(command) = cmd_rx.recv().await {
        match command {
            EngineCommand::StartInitialLoad => {
                coordinator.start_initial_load();
            }
            EngineCommand::Trigger(key) => coordinator.trigger(key),
            EngineCommand::ProbeImage(url) => coordinator.probe_image(url),
            EngineCommand::Shutdown => {
                coordinator.shutdown();
                break;
            }
        }
    }
}
