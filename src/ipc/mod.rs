//! Command transport over a Unix socket.
//!
//! Scripts and key-bind helpers connect to the socket and send
//! newline-delimited JSON [`Command`](crate::command::Command)s, for example
//! `echo '"ToggleEditMode"' | socat - UNIX-CONNECT:$XDG_RUNTIME_DIR/deskzones.sock`.

pub mod listener;
