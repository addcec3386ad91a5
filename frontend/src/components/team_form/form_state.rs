//! 队伍表单状态
//!
//! 将零散的 signal 整合为 `TeamFormState`，负责：
//! - 数据的持有与重置
//! - 从已有队伍回填（修改页）
//! - 校验并转换为请求对象
//!
//! 校验与转换放在纯数据的 `TeamDraft` 上，便于脱离浏览器测试。
//! 过期时间按用户所在时区解释，时区由调用方传入。

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use leptos::prelude::*;
use teams_matcher_shared::date;
use teams_matcher_shared::{Team, TeamAddRequest, TeamStatus, TeamUpdateRequest};

/// 队伍名称最大长度
const MAX_NAME_LEN: usize = 20;
/// 队伍描述最大长度
const MAX_DESCRIPTION_LEN: usize = 512;
/// 队伍密码最大长度
const MAX_PASSWORD_LEN: usize = 32;
/// 队伍人数上限
const MAX_MEMBERS: i32 = 20;
const DEFAULT_MAX_NUM: i32 = 3;

/// 表单内容快照
#[derive(Debug, Clone, PartialEq)]
pub struct TeamDraft {
    pub name: String,
    pub description: String,
    /// `datetime-local` 输入框的原始值，空串表示永久有效
    pub expire_time: String,
    pub max_num: i32,
    pub status: TeamStatus,
    pub password: String,
}

impl Default for TeamDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            expire_time: String::new(),
            max_num: DEFAULT_MAX_NUM,
            status: TeamStatus::Public,
            password: String::new(),
        }
    }
}

impl TeamDraft {
    /// 从已有队伍生成快照
    pub fn from_team<Tz>(team: &Team, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            name: team.name.clone(),
            description: team.description.clone(),
            expire_time: team
                .expire_time
                .as_ref()
                .map(|t| date::to_input_in(t, tz))
                .unwrap_or_default(),
            max_num: team.max_num,
            status: team.status,
            password: team.password.clone().unwrap_or_default(),
        }
    }

    /// 校验公共字段，返回解析后的过期时间
    fn validate<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> Result<Option<DateTime<Utc>>, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("队伍名称不能为空".to_string());
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(format!("队伍名称不能超过 {} 个字", MAX_NAME_LEN));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err("队伍描述过长".to_string());
        }
        if self.status.requires_password() {
            if self.password.trim().is_empty() {
                return Err("加密队伍必须设置密码".to_string());
            }
            if self.password.chars().count() > MAX_PASSWORD_LEN {
                return Err("密码过长".to_string());
            }
        }

        let expire_time = date::parse_input_in(&self.expire_time, tz)?;
        if let Some(t) = expire_time {
            if t <= now {
                return Err("过期时间必须晚于当前时间".to_string());
            }
        }
        Ok(expire_time)
    }

    /// 仅加密队伍携带密码
    fn password_opt(&self) -> Option<String> {
        if self.status.requires_password() {
            Some(self.password.clone())
        } else {
            None
        }
    }

    pub fn to_add_request<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> Result<TeamAddRequest, String> {
        let expire_time = self.validate(now, tz)?;
        if !(1..=MAX_MEMBERS).contains(&self.max_num) {
            return Err(format!("队伍人数需在 1 到 {} 之间", MAX_MEMBERS));
        }

        Ok(TeamAddRequest {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            expire_time,
            max_num: self.max_num,
            password: self.password_opt(),
            status: self.status,
        })
    }

    /// 修改请求不包含人数
    pub fn to_update_request<Tz: TimeZone>(
        &self,
        id: i64,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Result<TeamUpdateRequest, String> {
        let expire_time = self.validate(now, tz)?;

        Ok(TeamUpdateRequest {
            id,
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            expire_time,
            status: self.status,
            password: self.password_opt(),
        })
    }
}

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct TeamFormState {
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub expire_time: RwSignal<String>,
    pub max_num: RwSignal<i32>,
    pub status: RwSignal<TeamStatus>,
    pub password: RwSignal<String>,
}

impl TeamFormState {
    pub fn new() -> Self {
        let draft = TeamDraft::default();
        Self {
            name: RwSignal::new(draft.name),
            description: RwSignal::new(draft.description),
            expire_time: RwSignal::new(draft.expire_time),
            max_num: RwSignal::new(draft.max_num),
            status: RwSignal::new(draft.status),
            password: RwSignal::new(draft.password),
        }
    }

    /// 写入快照
    pub fn fill(&self, draft: TeamDraft) {
        self.name.set(draft.name);
        self.description.set(draft.description);
        self.expire_time.set(draft.expire_time);
        self.max_num.set(draft.max_num);
        self.status.set(draft.status);
        self.password.set(draft.password);
    }

    pub fn fill_from(&self, team: &Team) {
        self.fill(TeamDraft::from_team(team, &Local));
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        self.fill(TeamDraft::default());
    }

    /// 当前内容快照（非响应式读取）
    pub fn draft(&self) -> TeamDraft {
        TeamDraft {
            name: self.name.get_untracked(),
            description: self.description.get_untracked(),
            expire_time: self.expire_time.get_untracked(),
            max_num: self.max_num.get_untracked(),
            status: self.status.get_untracked(),
            password: self.password.get_untracked(),
        }
    }
}

impl Default for TeamFormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn draft(name: &str) -> TeamDraft {
        TeamDraft {
            name: name.to_string(),
            ..TeamDraft::default()
        }
    }

    #[test]
    fn test_add_request_public_team() {
        let mut d = draft("  Rust 学习小组 ");
        d.password = "ignored".to_string();
        d.expire_time = "2024-07-01T08:30".to_string();

        let req = d.to_add_request(now(), &Utc).unwrap();
        assert_eq!(req.name, "Rust 学习小组");
        assert_eq!(req.max_num, 3);
        assert_eq!(req.status, TeamStatus::Public);
        assert_eq!(req.password, None);
        assert_eq!(
            req.expire_time,
            Some(Utc.with_ymd_and_hms(2024, 7, 1, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_empty_expire_time_is_permanent() {
        let req = draft("team").to_add_request(now(), &Utc).unwrap();
        assert_eq!(req.expire_time, None);
    }

    #[test]
    fn test_secret_team_requires_password() {
        let mut d = draft("team");
        d.status = TeamStatus::Secret;
        assert!(d.to_add_request(now(), &Utc).is_err());

        d.password = "123456".to_string();
        let req = d.to_add_request(now(), &Utc).unwrap();
        assert_eq!(req.password.as_deref(), Some("123456"));

        d.password = "x".repeat(MAX_PASSWORD_LEN + 1);
        assert!(d.to_add_request(now(), &Utc).is_err());
    }

    #[test]
    fn test_name_rules() {
        assert!(draft("   ").to_add_request(now(), &Utc).is_err());
        assert!(draft(&"队".repeat(MAX_NAME_LEN)).to_add_request(now(), &Utc).is_ok());
        assert!(draft(&"队".repeat(MAX_NAME_LEN + 1)).to_add_request(now(), &Utc).is_err());
    }

    #[test]
    fn test_max_num_bounds() {
        let mut d = draft("team");
        d.max_num = 0;
        assert!(d.to_add_request(now(), &Utc).is_err());
        d.max_num = MAX_MEMBERS + 1;
        assert!(d.to_add_request(now(), &Utc).is_err());
        d.max_num = MAX_MEMBERS;
        assert!(d.to_add_request(now(), &Utc).is_ok());
    }

    #[test]
    fn test_expire_time_must_be_in_future() {
        let mut d = draft("team");
        d.expire_time = "2024-06-01T11:59".to_string();
        assert!(d.to_add_request(now(), &Utc).is_err());

        d.expire_time = "not a date".to_string();
        assert!(d.to_add_request(now(), &Utc).is_err());
    }

    #[test]
    fn test_update_request_skips_member_limit() {
        let mut d = draft("team");
        d.max_num = 0;
        d.status = TeamStatus::Private;
        d.password = "secret".to_string();

        let req = d.to_update_request(9, now(), &Utc).unwrap();
        assert_eq!(req.id, 9);
        assert_eq!(req.status, TeamStatus::Private);
        assert_eq!(req.password, None);
    }

    #[test]
    fn test_from_team_round_trips_form_values() {
        let json = serde_json::json!({
            "id": 4,
            "name": "周末爬山",
            "description": null,
            "expireTime": "2024-07-01T08:30:00.000+00:00",
            "maxNum": 5,
            "password": "pw",
            "status": 2,
            "createTime": "2024-05-01T00:00:00.000+00:00",
            "updateTime": "2024-05-01T00:00:00.000+00:00"
        });
        let team: Team = serde_json::from_value(json).unwrap();

        let d = TeamDraft::from_team(&team, &Utc);
        assert_eq!(d.name, "周末爬山");
        assert_eq!(d.description, "");
        assert_eq!(d.expire_time, "2024-07-01T08:30");
        assert_eq!(d.max_num, 5);
        assert_eq!(d.status, TeamStatus::Secret);
        assert_eq!(d.password, "pw");

        let req = d.to_update_request(team.id, now(), &Utc).unwrap();
        assert_eq!(req.password.as_deref(), Some("pw"));
    }

    #[test]
    fn test_expire_time_follows_user_offset() {
        let east8 = FixedOffset::east_opt(8 * 3600).unwrap();
        let mut d = draft("team");
        // 北京时间 6 月 1 日 19:00 即 UTC 11:00，早于 now()
        d.expire_time = "2024-06-01T19:00".to_string();
        assert!(d.to_add_request(now(), &east8).is_err());
        assert!(d.to_add_request(now(), &Utc).is_ok());

        d.expire_time = "2024-07-01T16:30".to_string();
        let req = d.to_add_request(now(), &east8).unwrap();
        assert_eq!(
            req.expire_time,
            Some(Utc.with_ymd_and_hms(2024, 7, 1, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_from_team_shows_local_time() {
        let json = serde_json::json!({
            "id": 4,
            "name": "夜跑",
            "expireTime": "2024-07-01T20:00:00.000+00:00",
            "maxNum": 5,
            "status": 0,
            "createTime": "2024-05-01T00:00:00.000+00:00",
            "updateTime": "2024-05-01T00:00:00.000+00:00"
        });
        let team: Team = serde_json::from_value(json).unwrap();
        let east8 = FixedOffset::east_opt(8 * 3600).unwrap();

        let d = TeamDraft::from_team(&team, &east8);
        assert_eq!(d.expire_time, "2024-07-02T04:00");
        let req = d.to_update_request(team.id, now(), &east8).unwrap();
        assert_eq!(req.expire_time, team.expire_time);
    }
}
