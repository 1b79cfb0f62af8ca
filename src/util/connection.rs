use std::fmt;
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;

use crate::{error, info, warn};

#[derive(Debug)]
pub enum Message {
    Open,
    Text(String),
    Nop,
    Close,
    NoConnection,
}

pub trait Connection: Send {
    fn send(&mut self, _msg: &str);
    fn recv(&mut self) -> Message;
}

impl fmt::Debug for dyn Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn Connection")
    }
}

// websocket
// ゲーム内ブリッジからの接続を受け付けるサーバ 同時接続は1本のみ
pub struct WsConnection {
    stream: Option<tungstenite::protocol::WebSocket<TcpStream>>,
    rx: mpsc::Receiver<TcpStream>,
}

impl WsConnection {
    pub fn new(addr: &str) -> Self {
        let (tx, rx) = mpsc::channel();
        let conn = Self { stream: None, rx };

        let listener = TcpListener::bind(addr).unwrap();
        thread::spawn(move || {
            for request in listener.incoming() {
                match request {
                    Ok(stream) => tx.send(stream).unwrap(),
                    Err(e) => error!("ws error: {}", e),
                }
            }
        });

        conn
    }
}

impl Connection for WsConnection {
    fn send(&mut self, msg: &str) {
        if let Some(stream) = self.stream.as_mut() {
            stream.send(msg.into()).ok();
        }
    }

    fn recv(&mut self) -> Message {
        if let Ok(stream) = self.rx.try_recv() {
            if self.stream.is_none() {
                info!("ws connection opened from: {}", stream.peer_addr().unwrap());
                match tungstenite::accept(stream) {
                    Ok(s) => {
                        s.get_ref().set_nonblocking(true).unwrap();
                        self.stream = Some(s);
                    }
                    Err(e) => error!("ws upgrade error: {}", e),
                }

                return Message::Open;
            } else {
                error!("ws duplicated connection");
            }
        }

        if self.stream.is_none() {
            return Message::NoConnection;
        }

        let stream = self.stream.as_mut().unwrap();
        loop {
            use tungstenite::protocol::Message as WsMessage;
            match stream.read() {
                Ok(msg) => match msg {
                    WsMessage::Close(_) => {
                        stream.send(WsMessage::Close(None)).ok();
                        break;
                    }
                    WsMessage::Ping(ping) => {
                        stream.send(WsMessage::Pong(ping)).ok();
                    }
                    WsMessage::Text(text) => {
                        return Message::Text(text);
                    }
                    _ => {
                        warn!("ws unhandled message: {:?}", msg);
                    }
                },
                Err(e) => {
                    use tungstenite::error::Error as WsError;
                    if let WsError::Io(e) = &e {
                        if e.kind() == std::io::ErrorKind::WouldBlock {
                            return Message::Nop;
                        }
                    }

                    error!("ws error: {:?}", e);
                    break;
                }
            }
        }

        self.stream = None;
        info!("ws connection closed");
        Message::Close
    }
}
