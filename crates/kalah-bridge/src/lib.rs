//! # kalah-bridge
//!
//! エージェントのメッセージループを実プロセスの標準入出力からも、同一プロセス内の
//! シミュレータからも駆動できるようにするための通信路。
//!
//! - `mailbox`: 容量 1 のランデブー用メールボックス
//! - `bridge`: メールボックス 2 つで双方向の文字列チャネルを模したブリッジ
//! - `channel`: `MessageChannel` トレイトと行単位の `LineChannel`

pub mod bridge;
pub mod channel;
pub mod error;
pub mod mailbox;

pub use bridge::{AgentEndpoint, Bridge, HostEndpoint};
pub use channel::{LineChannel, MessageChannel};
pub use error::{BridgeError, BridgeResult};
pub use mailbox::Mailbox;
