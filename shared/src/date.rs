//! 时间工具模块
//!
//! 服务端以 RFC 3339 字符串传输时间（如 `2024-05-01T10:00:00.000+00:00`），
//! 模型里统一用 `DateTime<Utc>` 持有。这里提供界面需要的两种转换：
//! - 展示格式化
//! - `<input type="datetime-local">` 的值与 `DateTime<Utc>` 之间的互转
//!
//! 界面上的时间都是用户本地时间。`*_in` 版本接收时区参数，
//! `format_display` 直接使用 `Local`（浏览器中由 wasmbind 读取 JS 时区）。

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// `datetime-local` 输入框的值格式
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// 列表、详情中展示的格式
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn format_display_in<Tz>(time: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.with_timezone(tz).format(DISPLAY_FORMAT).to_string()
}

/// 格式化为本地时间的展示文本
pub fn format_display(time: &DateTime<Utc>) -> String {
    format_display_in(time, &Local)
}

/// 可选时间的展示文本，缺省显示 "永久有效"
pub fn format_expire(time: Option<&DateTime<Utc>>) -> String {
    match time {
        Some(time) => format_display(time),
        None => "永久有效".to_string(),
    }
}

/// 按给定时区解析 `datetime-local` 输入框的值
///
/// 空字符串返回 `Ok(None)`（不设置过期时间），格式错误返回 `Err`。
/// 夏令时回拨造成的重复时刻取较早的一个。
pub fn parse_input_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Result<Option<DateTime<Utc>>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let naive = NaiveDateTime::parse_from_str(value, INPUT_FORMAT)
        .map_err(|e| format!("时间格式错误: {} ({})", value, e))?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| Some(local.with_timezone(&Utc)))
        .ok_or_else(|| format!("本地时间不存在: {}", value))
}

/// 转换为给定时区下 `datetime-local` 输入框的值
pub fn to_input_in<Tz>(time: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.with_timezone(tz).format(INPUT_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn east8() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    #[test]
    fn test_parse_input_utc() {
        let parsed = parse_input_in("2030-01-02T03:04", &Utc).unwrap().unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 0).unwrap());
        assert_eq!(to_input_in(&parsed, &Utc), "2030-01-02T03:04");
    }

    #[test]
    fn test_parse_input_uses_local_offset() {
        // UTC+8 的 20:00 是 UTC 的 12:00
        let parsed = parse_input_in("2030-01-02T20:00", &east8()).unwrap().unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2030, 1, 2, 12, 0, 0).unwrap());
        assert_eq!(to_input_in(&parsed, &east8()), "2030-01-02T20:00");

        let west5 = FixedOffset::west_opt(5 * 3600).unwrap();
        let parsed = parse_input_in("2030-01-02T20:00", &west5).unwrap().unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2030, 1, 3, 1, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_input_empty_and_invalid() {
        assert_eq!(parse_input_in("  ", &Utc).unwrap(), None);
        assert!(parse_input_in("2030/01/02", &Utc).is_err());
    }

    #[test]
    fn test_format_display_in_offset() {
        let time = Utc.with_ymd_and_hms(2030, 1, 2, 20, 4, 0).unwrap();
        assert_eq!(format_display_in(&time, &Utc), "2030-01-02 20:04");
        assert_eq!(format_display_in(&time, &east8()), "2030-01-03 04:04");
    }

    #[test]
    fn test_format_expire() {
        assert_eq!(format_expire(None), "永久有效");
        let time = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 0).unwrap();
        assert_eq!(format_expire(Some(&time)), format_display(&time));
    }
}
