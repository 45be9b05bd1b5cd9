//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `config_file`  | ConfigPort         | Optional JSON file       |
//! | `console`      | EventSink          | stdout panels / JSON     |
//! |                | (line parser)      | stdin                    |
//! | `log_sink`     | EventSink          | `log` facade             |
//! | `simulated`    | SensorPort         | Fixed field readings     |
//! |                | ActuatorPort       | In-memory device relays  |

pub mod config_file;
pub mod console;
pub mod log_sink;
pub mod simulated;
