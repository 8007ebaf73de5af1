//! Headless host for the flocking engine: supplies an attractor every tick,
//! paces the loop and forwards each frame to a sink.

pub mod attractor;
pub mod pacer;
pub mod settings;
pub mod simulation;
pub mod sink;

pub use attractor::{AttractorInput, AttractorMode, AttractorSource};
pub use pacer::Pacer;
pub use simulation::SimulationLoop;
pub use sink::{DiscardSink, FrameSink, JsonLinesSink, RecordingSink};
