//! 浏览器会话获取
//!
//! 两种模式：启动受管的无头浏览器，或连接到调试端口上已运行的浏览器。
//! 整个运行期只获取一次，由编排层持有并在结束时释放。

pub mod connection;
pub mod headless;

pub use connection::connect_existing;
pub use headless::launch_headless;
