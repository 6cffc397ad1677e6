//! Runs a [`Popstack`] on a tokio interval.
//!
//! The engine lives in one task. Ticks, commands from [`Handle`]s and
//! animation completions are multiplexed onto it, so no two of them ever run
//! at the same time.

use crate::{
    constants::CHANNEL_BUFFER_SIZE,
    engine::{Popstack, Snapshot},
    error::EngineError,
    options::OptionValue,
    renderer::{Animation, Renderer},
};
use popstack_util::{ElementId, Notification};
use std::time::Instant;
use tokio::{
    sync::{
        mpsc::{self, Receiver, Sender, UnboundedReceiver},
        oneshot,
    },
    task::JoinHandle,
    time::{Interval, MissedTickBehavior},
};
use tracing::{debug, trace};

#[derive(Debug)]
pub enum Input {
    Add(Notification),
    Enable,
    Disable,
    Pause,
    Unpause,
    CloseAll,
    Close(ElementId),
    Click(ElementId),
    EmptyQueue,
    PointerEnter,
    PointerLeave,
    Resize,
    TogglePanel,
    GetOption(String, oneshot::Sender<Option<OptionValue>>),
    SetOption(String, OptionValue),
    Snapshot(oneshot::Sender<Snapshot>),
    Destroy,
}

/// Cloneable front end of a running engine.
#[derive(Debug, Clone)]
pub struct Handle {
    tx: Sender<Input>,
}

impl Handle {
    async fn send(&self, input: Input) -> Result<(), EngineError> {
        self.tx.send(input).await.map_err(|_| EngineError::ChannelClosed)
    }

    pub async fn add(&self, notification: Notification) -> Result<(), EngineError> {
        self.send(Input::Add(notification)).await
    }

    pub async fn enable(&self) -> Result<(), EngineError> {
        self.send(Input::Enable).await
    }

    pub async fn disable(&self) -> Result<(), EngineError> {
        self.send(Input::Disable).await
    }

    pub async fn pause(&self) -> Result<(), EngineError> {
        self.send(Input::Pause).await
    }

    pub async fn unpause(&self) -> Result<(), EngineError> {
        self.send(Input::Unpause).await
    }

    pub async fn close_all(&self) -> Result<(), EngineError> {
        self.send(Input::CloseAll).await
    }

    pub async fn close(&self, id: ElementId) -> Result<(), EngineError> {
        self.send(Input::Close(id)).await
    }

    pub async fn click(&self, id: ElementId) -> Result<(), EngineError> {
        self.send(Input::Click(id)).await
    }

    pub async fn empty_queue(&self) -> Result<(), EngineError> {
        self.send(Input::EmptyQueue).await
    }

    pub async fn pointer_enter(&self) -> Result<(), EngineError> {
        self.send(Input::PointerEnter).await
    }

    pub async fn pointer_leave(&self) -> Result<(), EngineError> {
        self.send(Input::PointerLeave).await
    }

    pub async fn resize(&self) -> Result<(), EngineError> {
        self.send(Input::Resize).await
    }

    pub async fn toggle_panel(&self) -> Result<(), EngineError> {
        self.send(Input::TogglePanel).await
    }

    pub async fn set_option(&self, key: &str, value: OptionValue) -> Result<(), EngineError> {
        self.send(Input::SetOption(key.to_string(), value)).await
    }

    pub async fn get_option(&self, key: &str) -> Result<Option<OptionValue>, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.send(Input::GetOption(key.to_string(), tx)).await?;
        rx.await.map_err(|_| EngineError::ChannelClosed)
    }

    pub async fn snapshot(&self) -> Result<Snapshot, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.send(Input::Snapshot(tx)).await?;
        rx.await.map_err(|_| EngineError::ChannelClosed)
    }

    /// Tear the instance down and stop its task.
    pub async fn destroy(&self) -> Result<(), EngineError> {
        self.send(Input::Destroy).await
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// A command channel for [`run`].
pub fn channel() -> (Handle, Receiver<Input>) {
    let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
    (Handle { tx }, rx)
}

/// Spawn `engine` on the current runtime.
pub fn spawn<R>(
    engine: Popstack<R>,
    completions: UnboundedReceiver<Animation>,
) -> (Handle, JoinHandle<Result<(), EngineError>>)
where
    R: Renderer + Send + 'static,
{
    let (handle, inputs) = channel();
    let task = tokio::spawn(run(engine, inputs, completions));
    (handle, task)
}

/// Drive `engine` until it is destroyed, every handle is dropped, or a tick
/// fails.
pub async fn run<R: Renderer>(
    engine: Popstack<R>,
    inputs: Receiver<Input>,
    completions: UnboundedReceiver<Animation>,
) -> Result<(), EngineError> {
    let (machine, ticker) = Machine::<Start, R>::new(engine, inputs, completions).exec();
    machine.exec(ticker).await
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

struct Start;
struct Running;

struct Machine<S, R: Renderer> {
    engine: Popstack<R>,
    inputs: Receiver<Input>,
    completions: UnboundedReceiver<Animation>,
    marker: core::marker::PhantomData<S>,
}

impl<S, R: Renderer> Machine<S, R> {
    fn transition<Next>(self) -> Machine<Next, R> {
        Machine::<Next, R> {
            engine: self.engine,
            inputs: self.inputs,
            completions: self.completions,
            marker: core::marker::PhantomData,
        }
    }
}

impl<R: Renderer> Machine<Start, R> {
    fn new(engine: Popstack<R>, inputs: Receiver<Input>, completions: UnboundedReceiver<Animation>) -> Self {
        Self {
            engine,
            inputs,
            completions,
            marker: core::marker::PhantomData,
        }
    }

    fn exec(self) -> (Machine<Running, R>, Interval) {
        let period = self.engine.config().interval();
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        debug!("Driving {} every {:?}", self.engine.surface_id(), period);
        (self.transition::<Running>(), ticker)
    }
}

impl<R: Renderer> Machine<Running, R> {
    async fn exec(mut self, mut ticker: Interval) -> Result<(), EngineError> {
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.engine.tick(now())?;
                }
                Some(animation) = self.completions.recv() => {
                    self.engine.animation_finished(animation, now());
                }
                input = self.inputs.recv() => match input {
                    Some(Input::Destroy) | None => {
                        self.engine.destroy();
                        return Ok(());
                    }
                    Some(input) => self.handle(input),
                },
            }
        }
    }

    fn handle(&mut self, input: Input) {
        trace!("Driver input {:?}", input);
        let engine = &mut self.engine;
        match input {
            Input::Add(notification) => engine.add(notification),
            Input::Enable => engine.enable(),
            Input::Disable => engine.disable(),
            Input::Pause => engine.pause(now()),
            Input::Unpause => engine.unpause(now()),
            Input::CloseAll => engine.close_all(),
            Input::Close(id) => engine.close(id),
            Input::Click(id) => engine.click(id),
            Input::EmptyQueue => engine.empty_queue(),
            Input::PointerEnter => engine.pointer_enter(now()),
            Input::PointerLeave => engine.pointer_leave(now()),
            Input::Resize => engine.resize(now()),
            Input::TogglePanel => engine.toggle_panel(),
            Input::GetOption(key, reply) => {
                _ = reply.send(engine.get_option(&key));
            }
            Input::SetOption(key, value) => engine.set_option(&key, value),
            Input::Snapshot(reply) => {
                _ = reply.send(engine.snapshot());
            }
            Input::Destroy => engine.destroy(),
        }
    }
}
