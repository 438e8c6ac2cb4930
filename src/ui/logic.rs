//! 业务逻辑处理 (Update/Dispatch)

use tracing::trace;

use super::actions::{Action, InputEvent};
use super::state::App;

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::Scroll(scroll) => self.messages.scroll(scroll),
            Action::ClearMessages => self.messages.clear(),
            Action::Route(event) => self.route(event),
        }
        false
    }

    fn route(&mut self, event: InputEvent) {
        trace!(?event, "routing");
        let routed = self
            .router
            .route(event, &mut self.prompt, &mut self.submissions);
        trace!(?routed, "routed");
    }
}
