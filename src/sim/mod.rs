//! Thin simulator harness: loads a scene, owns its graph and physics, and
//! keeps the scene's path finder alive across resets.

mod pathfinder;
mod simulator;

pub use self::pathfinder::PathFinder;
pub use self::simulator::{Simulator, SimulatorConfiguration};
