//! 终端事件映射 (Event -> Action)
//!
//! 提交键与强制换行键来自配置，按 提交 > 换行 > 默认编辑 的顺序匹配

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

use super::actions::{Action, Edit, FocusChange, InputEvent, Motion, Scroll};
use crate::config::KeymapConfig;

const WHEEL_STEP: u16 = 3;

/// 将终端事件转换为 Action，无法识别的事件返回 None
pub fn get_action(keymap: &KeymapConfig, event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => key_action(keymap, key),
        Event::Paste(text) => Some(Action::Route(InputEvent::Paste(text.clone()))),
        Event::FocusGained => Some(Action::Route(InputEvent::Focus(FocusChange::Gained))),
        Event::FocusLost => Some(Action::Route(InputEvent::Focus(FocusChange::Lost))),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::Scroll(Scroll::LineUp(WHEEL_STEP))),
            MouseEventKind::ScrollDown => Some(Action::Scroll(Scroll::LineDown(WHEEL_STEP))),
            _ => None,
        },
        _ => None,
    }
}

fn key_action(keymap: &KeymapConfig, key: &KeyEvent) -> Option<Action> {
    if keymap.quit.matches(key) {
        return Some(Action::Quit);
    }
    if keymap.submit.matches(key) {
        return Some(Action::Route(InputEvent::Trigger));
    }
    if keymap.newline.iter().any(|chord| chord.matches(key)) {
        return Some(Action::Route(InputEvent::Edit(Edit::Newline)));
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let event = match key.code {
        KeyCode::PageUp => return Some(Action::Scroll(Scroll::PageUp)),
        KeyCode::PageDown => return Some(Action::Scroll(Scroll::PageDown)),
        KeyCode::Home if ctrl => return Some(Action::Scroll(Scroll::Top)),
        KeyCode::End if ctrl => return Some(Action::Scroll(Scroll::Bottom)),
        KeyCode::Char('l') if ctrl => return Some(Action::ClearMessages),

        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            InputEvent::Insert(c)
        }
        // 未被配置为提交键的 Enter 一律换行
        KeyCode::Enter => InputEvent::Edit(Edit::Newline),
        KeyCode::Backspace => InputEvent::Edit(Edit::Backspace),
        KeyCode::Delete => InputEvent::Edit(Edit::Delete),
        KeyCode::Tab => InputEvent::Edit(Edit::Indent),
        KeyCode::BackTab => InputEvent::Edit(Edit::Dedent),
        KeyCode::Left => InputEvent::Navigate(Motion::Left),
        KeyCode::Right => InputEvent::Navigate(Motion::Right),
        KeyCode::Up => InputEvent::Navigate(Motion::Up),
        KeyCode::Down => InputEvent::Navigate(Motion::Down),
        KeyCode::Home => InputEvent::Navigate(Motion::Home),
        KeyCode::End => InputEvent::Navigate(Motion::End),
        _ => return None,
    };
    Some(Action::Route(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::parse_key_chord;

    fn keymap(submit: &str) -> KeymapConfig {
        KeymapConfig {
            submit: parse_key_chord(submit).expect("submit"),
            newline: vec![
                parse_key_chord("alt+enter").expect("newline"),
                parse_key_chord("ctrl+j").expect("newline"),
            ],
            quit: parse_key_chord("ctrl+c").expect("quit"),
        }
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn plain_enter_is_trigger_by_default() {
        let map = keymap("enter");
        assert_eq!(
            get_action(&map, &press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::Route(InputEvent::Trigger))
        );
    }

    #[test]
    fn modified_enter_inserts_newline() {
        let map = keymap("enter");
        assert_eq!(
            get_action(&map, &press(KeyCode::Enter, KeyModifiers::ALT)),
            Some(Action::Route(InputEvent::Edit(Edit::Newline)))
        );
        assert_eq!(
            get_action(&map, &press(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            Some(Action::Route(InputEvent::Edit(Edit::Newline)))
        );
    }

    #[test]
    fn enter_inserts_newline_when_submit_is_rebound() {
        let map = keymap("ctrl+s");
        assert_eq!(
            get_action(&map, &press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::Route(InputEvent::Edit(Edit::Newline)))
        );
        assert_eq!(
            get_action(&map, &press(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Some(Action::Route(InputEvent::Trigger))
        );
    }

    #[test]
    fn characters_and_navigation_map_to_input_events() {
        let map = keymap("enter");
        assert_eq!(
            get_action(&map, &press(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(Action::Route(InputEvent::Insert('A')))
        );
        assert_eq!(
            get_action(&map, &press(KeyCode::Left, KeyModifiers::NONE)),
            Some(Action::Route(InputEvent::Navigate(Motion::Left)))
        );
        assert_eq!(
            get_action(&map, &press(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn app_level_keys_do_not_reach_the_router() {
        let map = keymap("enter");
        assert_eq!(
            get_action(&map, &press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(
            get_action(&map, &press(KeyCode::PageUp, KeyModifiers::NONE)),
            Some(Action::Scroll(Scroll::PageUp))
        );
        assert_eq!(
            get_action(&map, &press(KeyCode::Char('l'), KeyModifiers::CONTROL)),
            Some(Action::ClearMessages)
        );
    }

    #[test]
    fn paste_is_routed_as_one_event() {
        let map = keymap("enter");
        assert_eq!(
            get_action(&map, &Event::Paste("a\nb".to_string())),
            Some(Action::Route(InputEvent::Paste("a\nb".to_string())))
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let map = keymap("enter");
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(get_action(&map, &Event::Key(key)), None);
    }

    #[test]
    fn focus_events_are_routed() {
        let map = keymap("enter");
        assert_eq!(
            get_action(&map, &Event::FocusLost),
            Some(Action::Route(InputEvent::Focus(FocusChange::Lost)))
        );
    }
}
