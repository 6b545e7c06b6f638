pub mod analog_sampler;
pub mod bar_graph;
pub mod cylon;
pub mod led_port;
pub mod mode_selector;
pub mod serial_console;
pub mod tx_ring;

pub use analog_sampler::{AnalogSampler, TimerPeriod, TimingBucket};
pub use bar_graph::{BarGraph, DisplayWidth};
pub use cylon::{Cylon, CylonWidth, Direction};
pub use led_port::OutputPort;
pub use mode_selector::{Mode, ModeSelector};
pub use serial_console::{ByteSink, SerialConsole};
pub use tx_ring::{TxBufferFull, TxRing};
