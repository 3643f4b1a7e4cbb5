//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod chat_transport;
mod speech_synthesizer;

pub use chat_transport::{ChatTransportPort, SentMessage, TransportError};
pub use speech_synthesizer::{AudioSink, SpeechSynthesizerPort, SynthesisError};
