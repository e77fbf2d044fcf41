use crossterm::event::Event;
use std::io;
use std::thread;
use tokio::sync::mpsc;

/// Read terminal events on one long-lived thread and forward them in order.
///
/// The thread stops when `read` fails or the receiver is dropped.
pub fn spawn_reader<F>(mut read: F) -> mpsc::UnboundedReceiver<Event>
where
    F: FnMut() -> io::Result<Event> + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    thread::spawn(move || loop {
        match read() {
            Ok(event) => {
                if tx.send(event).is_err() {
                    break;
                }
            }
            Err(e) => {
                log::error!("Terminal input failed: {}", e);
                break;
            }
        }
    });
    rx
}
