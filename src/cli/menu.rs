use crate::cli::output::{ConsoleWriter, OutputWriter};
use crate::core::chamber::Chamber;
use crate::core::protocol::error_codes;
use crate::domain::error::{ChamberError, ChamberResult};
use std::io::{self, Write};
use tokio::io::AsyncBufReadExt;

const MAIN_MENU: &str = "\
==========================================
  1. Command mode
  2. Batch mode
  3. Controller capabilities
  4. Controller error codes
  0. Quit
==========================================
";

/// Menu screens
///
/// `BatchEntry` carries the commands queued so far, so the whole menu state
/// lives in this one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState {
    Main,
    CommandEntry,
    BatchEntry(Vec<String>),
    Done,
}

/// Side effect requested by a menu transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    None,
    ShowMenu,
    Invalid(&'static str),
    ShowCapabilities,
    ShowCodes,
    Send(String),
    SendBatch(Vec<String>),
}

/// Result of feeding one input line to the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTransition {
    pub next: MenuState,
    pub action: MenuAction,
}

/// Advance the menu by one input line
///
/// Pure state transition: no I/O happens here. The caller performs the
/// returned action and loops.
pub fn handle_input(state: MenuState, line: &str) -> MenuTransition {
    let line = line.trim();
    match state {
        MenuState::Main => match line {
            "1" => MenuTransition {
                next: MenuState::CommandEntry,
                action: MenuAction::None,
            },
            "2" => MenuTransition {
                next: MenuState::BatchEntry(Vec::new()),
                action: MenuAction::None,
            },
            "3" => MenuTransition {
                next: MenuState::Main,
                action: MenuAction::ShowCapabilities,
            },
            "4" => MenuTransition {
                next: MenuState::Main,
                action: MenuAction::ShowCodes,
            },
            "0" | "q" | "quit" | "exit" => MenuTransition {
                next: MenuState::Done,
                action: MenuAction::None,
            },
            "" => MenuTransition {
                next: MenuState::Main,
                action: MenuAction::ShowMenu,
            },
            _ => MenuTransition {
                next: MenuState::Main,
                action: MenuAction::Invalid("Invalid selection. Try again."),
            },
        },
        MenuState::CommandEntry => match line {
            "exit" => MenuTransition {
                next: MenuState::Main,
                action: MenuAction::ShowMenu,
            },
            "" => MenuTransition {
                next: MenuState::CommandEntry,
                action: MenuAction::None,
            },
            command => MenuTransition {
                next: MenuState::CommandEntry,
                action: MenuAction::Send(command.to_string()),
            },
        },
        MenuState::BatchEntry(mut queue) => match line {
            "exit" => MenuTransition {
                next: MenuState::Main,
                action: MenuAction::ShowMenu,
            },
            "" if queue.is_empty() => MenuTransition {
                next: MenuState::Main,
                action: MenuAction::ShowMenu,
            },
            "" => MenuTransition {
                next: MenuState::Main,
                action: MenuAction::SendBatch(queue),
            },
            command => {
                queue.push(command.to_string());
                MenuTransition {
                    next: MenuState::BatchEntry(queue),
                    action: MenuAction::None,
                }
            }
        },
        MenuState::Done => MenuTransition {
            next: MenuState::Done,
            action: MenuAction::None,
        },
    }
}

/// Run the interactive menu until the user quits or stdin closes
pub async fn run_menu(chamber: &mut Chamber, writer: &ConsoleWriter) -> ChamberResult<()> {
    let mut stdin = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    println!();
    println!(
        "Chamber controller menu - {} via {}",
        chamber.name(),
        chamber.transport_type()
    );
    print!("{}", MAIN_MENU);

    let mut state = MenuState::Main;
    loop {
        let prompt = match &state {
            MenuState::Main => "Make selection: ".to_string(),
            MenuState::CommandEntry => "[Enter cmd (\"exit\" to return)] >> ".to_string(),
            MenuState::BatchEntry(queue) if queue.is_empty() => {
                "[batch: empty line sends, \"exit\" discards]\n[batch:0] >> ".to_string()
            }
            MenuState::BatchEntry(queue) => format!("[batch:{}] >> ", queue.len()),
            MenuState::Done => break,
        };
        print!("{}", prompt);
        io::stdout().flush()?;

        let line = match stdin.next_line().await? {
            Some(line) => line,
            None => break,
        };

        let transition = handle_input(state, &line);
        state = transition.next;

        match transition.action {
            MenuAction::None => {}
            MenuAction::ShowMenu => print!("{}", MAIN_MENU),
            MenuAction::Invalid(message) => println!("{}", message),
            MenuAction::ShowCapabilities => {
                writer.write_capabilities(chamber.name(), chamber.capabilities())?;
            }
            MenuAction::ShowCodes => {
                writer.write_codes(error_codes::entries())?;
            }
            MenuAction::Send(command) => match chamber.transact(&command).await {
                Ok(response) => writer.write_response(&command, &response)?,
                Err(e) => report_device_error(writer, e)?,
            },
            MenuAction::SendBatch(commands) => match chamber.transact_all(&commands).await {
                Ok(responses) => {
                    let pairs: Vec<(String, Vec<u8>)> =
                        commands.into_iter().zip(responses).collect();
                    writer.write_responses(&pairs)?;
                }
                Err(e) => report_device_error(writer, e)?,
            },
        }

        if state == MenuState::Done {
            break;
        }
    }

    chamber.close().await?;
    Ok(())
}

/// Report a per-command failure without ending the session
///
/// Timeouts and controller rejections are part of normal operation at the
/// menu. Anything else means the link itself is broken and propagates.
fn report_device_error(writer: &ConsoleWriter, error: ChamberError) -> ChamberResult<()> {
    match error {
        ChamberError::Timeout => {
            writer.write_error("No response from chamber. Check cable or controller option.")?;
        }
        ChamberError::Protocol { .. } => {
            writer.write_error(&error.to_string())?;
        }
        other => return Err(other),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_menu_selects_command_mode() {
        let t = handle_input(MenuState::Main, "1");
        assert_eq!(t.next, MenuState::CommandEntry);
        assert_eq!(t.action, MenuAction::None);
    }

    #[test]
    fn test_main_menu_selects_batch_mode() {
        let t = handle_input(MenuState::Main, "2");
        assert_eq!(t.next, MenuState::BatchEntry(Vec::new()));
        assert_eq!(t.action, MenuAction::None);
    }

    #[test]
    fn test_main_menu_shows_capabilities_in_place() {
        let t = handle_input(MenuState::Main, "3");
        assert_eq!(t.next, MenuState::Main);
        assert_eq!(t.action, MenuAction::ShowCapabilities);
    }

    #[test]
    fn test_main_menu_shows_codes_in_place() {
        let t = handle_input(MenuState::Main, "4");
        assert_eq!(t.next, MenuState::Main);
        assert_eq!(t.action, MenuAction::ShowCodes);
    }

    #[test]
    fn test_main_menu_quits() {
        for input in ["0", "q", "quit", "exit"] {
            let t = handle_input(MenuState::Main, input);
            assert_eq!(t.next, MenuState::Done, "input {input:?}");
        }
    }

    #[test]
    fn test_main_menu_rejects_unknown_selection() {
        let t = handle_input(MenuState::Main, "7");
        assert_eq!(t.next, MenuState::Main);
        assert_eq!(t.action, MenuAction::Invalid("Invalid selection. Try again."));
    }

    #[test]
    fn test_main_menu_empty_line_reprints_menu() {
        let t = handle_input(MenuState::Main, "");
        assert_eq!(t.next, MenuState::Main);
        assert_eq!(t.action, MenuAction::ShowMenu);
    }

    #[test]
    fn test_input_is_trimmed() {
        let t = handle_input(MenuState::Main, "  1  ");
        assert_eq!(t.next, MenuState::CommandEntry);
    }

    #[test]
    fn test_command_entry_sends_line() {
        let t = handle_input(MenuState::CommandEntry, "TEMP?");
        assert_eq!(t.next, MenuState::CommandEntry);
        assert_eq!(t.action, MenuAction::Send("TEMP?".to_string()));
    }

    #[test]
    fn test_command_entry_preserves_interior_spaces() {
        let t = handle_input(MenuState::CommandEntry, "TEMP, S25.0");
        assert_eq!(t.action, MenuAction::Send("TEMP, S25.0".to_string()));
    }

    #[test]
    fn test_command_entry_exit_returns_to_main() {
        let t = handle_input(MenuState::CommandEntry, "exit");
        assert_eq!(t.next, MenuState::Main);
        assert_eq!(t.action, MenuAction::ShowMenu);
    }

    #[test]
    fn test_command_entry_ignores_empty_line() {
        let t = handle_input(MenuState::CommandEntry, "");
        assert_eq!(t.next, MenuState::CommandEntry);
        assert_eq!(t.action, MenuAction::None);
    }

    #[test]
    fn test_batch_entry_queues_commands() {
        let t = handle_input(MenuState::BatchEntry(Vec::new()), "TEMP?");
        assert_eq!(t.next, MenuState::BatchEntry(vec!["TEMP?".to_string()]));
        assert_eq!(t.action, MenuAction::None);

        let t = handle_input(t.next, "HUMI?");
        assert_eq!(
            t.next,
            MenuState::BatchEntry(vec!["TEMP?".to_string(), "HUMI?".to_string()])
        );
    }

    #[test]
    fn test_batch_entry_empty_line_sends_queue() {
        let queue = vec!["TEMP?".to_string(), "HUMI?".to_string()];
        let t = handle_input(MenuState::BatchEntry(queue.clone()), "");
        assert_eq!(t.next, MenuState::Main);
        assert_eq!(t.action, MenuAction::SendBatch(queue));
    }

    #[test]
    fn test_batch_entry_empty_queue_returns_to_main() {
        let t = handle_input(MenuState::BatchEntry(Vec::new()), "");
        assert_eq!(t.next, MenuState::Main);
        assert_eq!(t.action, MenuAction::ShowMenu);
    }

    #[test]
    fn test_batch_entry_exit_discards_queue() {
        let queue = vec!["TEMP?".to_string()];
        let t = handle_input(MenuState::BatchEntry(queue), "exit");
        assert_eq!(t.next, MenuState::Main);
        assert_eq!(t.action, MenuAction::ShowMenu);
    }

    #[test]
    fn test_done_state_absorbs_input() {
        let t = handle_input(MenuState::Done, "1");
        assert_eq!(t.next, MenuState::Done);
        assert_eq!(t.action, MenuAction::None);
    }
}
