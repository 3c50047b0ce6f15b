mod control_loop;
mod proximity_state;

pub use {
    control_loop::*,
    proximity_state::*,
};
