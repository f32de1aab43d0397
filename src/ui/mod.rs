//! Terminal UI: rendering and the interactive loop. Domain state lives in
//! [`crate::core`].

pub mod chat_loop;
pub mod renderer;
