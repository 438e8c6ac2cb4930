//! UI 模块
//!
//! 采用 MVI (Model-View-Intent) 架构：
//! - Model (state.rs): App 即应用控制器，持有布局树与各区域
//! - View (view/): 将 State 映射为 UI
//! - Intent (actions.rs, input.rs): 终端事件转化为封闭的 Action 枚举
//! - 路由 (router.rs): 把输入事件投递给获得焦点的区域

pub mod actions;
pub mod input;
pub mod layout;
pub mod logic;
pub mod messages;
pub mod prompt;
pub mod router;
pub mod state;
pub mod view;

// Re-export for convenience
pub use input::get_action;
pub use state::App;
pub use view::render;
