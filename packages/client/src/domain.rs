//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use sunadokei_server::infrastructure::dto::websocket::TimerStateDto;
use sunadokei_shared::time::remaining_seconds;

use crate::error::ClientError;

/// Longest timer a creator may start, in minutes
const MAX_TIMER_MINUTES: u32 = 24 * 60;

/// A timer command entered at the creator prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Start a fresh countdown of the given preset
    Start { minutes: u32 },
    /// Freeze the running countdown
    Pause,
    /// Continue a paused countdown
    Resume,
}

/// Parse a line from the creator prompt into a timer command.
///
/// # Arguments
///
/// * `line` - The trimmed input line
///
/// # Returns
///
/// The parsed command, or `ClientError::InvalidCommand` with a hint
pub fn parse_command(line: &str) -> Result<TimerCommand, ClientError> {
    let mut parts = line.split_whitespace();

    match parts.next() {
        Some("start") => {
            let minutes_arg = parts.next().ok_or_else(|| {
                ClientError::InvalidCommand("usage: start <minutes>".to_string())
            })?;
            let minutes: u32 = minutes_arg.parse().map_err(|_| {
                ClientError::InvalidCommand(format!("'{minutes_arg}' is not a number of minutes"))
            })?;
            if minutes == 0 || minutes > MAX_TIMER_MINUTES {
                return Err(ClientError::InvalidCommand(format!(
                    "minutes must be between 1 and {MAX_TIMER_MINUTES}"
                )));
            }
            Ok(TimerCommand::Start { minutes })
        }
        Some("pause") => Ok(TimerCommand::Pause),
        Some("resume") => Ok(TimerCommand::Resume),
        Some(other) => Err(ClientError::InvalidCommand(format!(
            "unknown command '{other}' (expected start/pause/resume)"
        ))),
        None => Err(ClientError::InvalidCommand("empty command".to_string())),
    }
}

/// Compute the next timer state for a command.
///
/// # Arguments
///
/// * `command` - The command to apply
/// * `current` - The last known timer state, if any
/// * `now_millis` - Current time as UTC epoch milliseconds
///
/// # Returns
///
/// The timer state to broadcast, or `ClientError::NoActiveTimer` when
/// pause/resume is issued before any start
pub fn apply_command(
    command: TimerCommand,
    current: Option<&TimerStateDto>,
    now_millis: i64,
) -> Result<TimerStateDto, ClientError> {
    match command {
        TimerCommand::Start { minutes } => Ok(TimerStateDto {
            end_time: Some(now_millis + i64::from(minutes) * 60_000),
            remaining_seconds: i64::from(minutes) * 60,
            preset_minutes: minutes,
            is_running: true,
        }),
        TimerCommand::Pause => {
            let current = current.ok_or(ClientError::NoActiveTimer)?;
            let remaining = match (current.is_running, current.end_time) {
                (true, Some(end_time)) => remaining_seconds(end_time, now_millis),
                // Already paused, or running without a deadline: keep the count
                _ => current.remaining_seconds.max(0),
            };
            Ok(TimerStateDto {
                end_time: None,
                remaining_seconds: remaining,
                preset_minutes: current.preset_minutes,
                is_running: false,
            })
        }
        TimerCommand::Resume => {
            let current = current.ok_or(ClientError::NoActiveTimer)?;
            let remaining = current.remaining_seconds.max(0);
            Ok(TimerStateDto {
                end_time: Some(now_millis + remaining * 1000),
                remaining_seconds: remaining,
                preset_minutes: current.preset_minutes,
                is_running: true,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_start() {
        // テスト項目: start コマンドが分数付きでパースされる
        // given (前提条件):
        let line = "start 5";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert_eq!(result, Ok(TimerCommand::Start { minutes: 5 }));
    }

    #[test]
    fn test_parse_command_start_without_minutes() {
        // テスト項目: 分数のない start はエラーになる
        // given (前提条件):
        let line = "start";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::InvalidCommand(_))));
    }

    #[test]
    fn test_parse_command_start_with_zero_minutes() {
        // テスト項目: 0 分の start はエラーになる
        // given (前提条件):
        let line = "start 0";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::InvalidCommand(_))));
    }

    #[test]
    fn test_parse_command_pause_and_resume() {
        // テスト項目: pause / resume がパースされる
        // given (前提条件):

        // when (操作):
        let pause = parse_command("pause");
        let resume = parse_command("resume");

        // then (期待する結果):
        assert_eq!(pause, Ok(TimerCommand::Pause));
        assert_eq!(resume, Ok(TimerCommand::Resume));
    }

    #[test]
    fn test_parse_command_unknown() {
        // テスト項目: 未知のコマンドはエラーになる
        // given (前提条件):
        let line = "stop";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::InvalidCommand(_))));
    }

    #[test]
    fn test_apply_command_start() {
        // テスト項目: start が期限付きの実行中タイマーを作る
        // given (前提条件):
        let now = 1700000000000;

        // when (操作):
        let result = apply_command(TimerCommand::Start { minutes: 5 }, None, now).unwrap();

        // then (期待する結果):
        assert_eq!(result.end_time, Some(now + 300_000));
        assert_eq!(result.remaining_seconds, 300);
        assert_eq!(result.preset_minutes, 5);
        assert!(result.is_running);
    }

    #[test]
    fn test_apply_command_pause_keeps_remaining() {
        // テスト項目: pause が残り時間を確定して期限を外す
        // given (前提条件): 5 分のタイマーが 2 分経過
        let started_at = 1700000000000;
        let current = apply_command(TimerCommand::Start { minutes: 5 }, None, started_at).unwrap();
        let now = started_at + 120_000;

        // when (操作):
        let result = apply_command(TimerCommand::Pause, Some(&current), now).unwrap();

        // then (期待する結果): 残り 3 分、停止中
        assert_eq!(result.end_time, None);
        assert_eq!(result.remaining_seconds, 180);
        assert_eq!(result.preset_minutes, 5);
        assert!(!result.is_running);
    }

    #[test]
    fn test_apply_command_pause_without_timer() {
        // テスト項目: タイマー開始前の pause はエラーになる
        // given (前提条件):
        let now = 1700000000000;

        // when (操作):
        let result = apply_command(TimerCommand::Pause, None, now);

        // then (期待する結果):
        assert_eq!(result, Err(ClientError::NoActiveTimer));
    }

    #[test]
    fn test_apply_command_resume_restores_deadline() {
        // テスト項目: resume が残り時間から新しい期限を計算する
        // given (前提条件): 残り 3 分で停止中のタイマー
        let paused = TimerStateDto {
            end_time: None,
            remaining_seconds: 180,
            preset_minutes: 5,
            is_running: false,
        };
        let now = 1700000500000;

        // when (操作):
        let result = apply_command(TimerCommand::Resume, Some(&paused), now).unwrap();

        // then (期待する結果):
        assert_eq!(result.end_time, Some(now + 180_000));
        assert_eq!(result.remaining_seconds, 180);
        assert!(result.is_running);
    }

    #[test]
    fn test_apply_command_resume_without_timer() {
        // テスト項目: タイマー開始前の resume はエラーになる
        // given (前提条件):
        let now = 1700000000000;

        // when (操作):
        let result = apply_command(TimerCommand::Resume, None, now);

        // then (期待する結果):
        assert_eq!(result, Err(ClientError::NoActiveTimer));
    }
}
