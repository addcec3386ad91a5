//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的数据层，不依赖于 DOM 或 web_sys。
//! `ROUTES` 是有序的路由表：(路径, 标题, 页面)。

use std::fmt::Display;

/// 应用路由枚举，每个变体对应一个页面组件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    /// 主页 (默认路由)
    #[default]
    Index,
    /// 找队伍
    Team,
    /// 个人页
    User,
    /// 找伙伴（按标签搜索）
    Search,
    /// 编辑单个资料字段
    UserEdit,
    /// 搜索结果
    UserList,
    UserLogin,
    UserRegister,
    /// 资料列表
    UserUpdate,
    /// 我加入的队伍
    UserTeamJoin,
    /// 我创建的队伍
    UserTeamCreate,
    TeamAdd,
    TeamUpdate,
    /// 页面未找到
    NotFound,
}

/// 路由表中的一条记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRecord {
    pub path: &'static str,
    pub title: Option<&'static str>,
    pub route: AppRoute,
}

const fn record(path: &'static str, title: &'static str, route: AppRoute) -> RouteRecord {
    RouteRecord {
        path,
        title: Some(title),
        route,
    }
}

/// 路由表（有序）
pub const ROUTES: &[RouteRecord] = &[
    record("/", "主页", AppRoute::Index),
    record("/team", "找队伍", AppRoute::Team),
    record("/user", "个人信息", AppRoute::User),
    record("/search", "找伙伴", AppRoute::Search),
    record("/user/edit", "编辑信息", AppRoute::UserEdit),
    record("/user/list", "用户列表", AppRoute::UserList),
    record("/user/login", "登录", AppRoute::UserLogin),
    record("/user/register", "注册", AppRoute::UserRegister),
    record("/user/update", "更新信息", AppRoute::UserUpdate),
    record("/user/team/join", "加入的队伍", AppRoute::UserTeamJoin),
    record("/user/team/create", "创建的队伍", AppRoute::UserTeamCreate),
    record("/team/add", "创建队伍", AppRoute::TeamAdd),
    record("/team/update", "更新队伍", AppRoute::TeamUpdate),
];

/// 未匹配时使用的路径
const NOT_FOUND_PATH: &str = "/404";

/// 站点名，用于拼接文档标题
pub const SITE_TITLE: &str = "伙伴匹配";

impl AppRoute {
    /// 将 URL 解析为路由枚举，忽略查询串与片段
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("/");
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        ROUTES
            .iter()
            .find(|r| r.path == path)
            .map(|r| r.route)
            .unwrap_or(Self::NotFound)
    }

    fn record(&self) -> Option<&'static RouteRecord> {
        ROUTES.iter().find(|r| r.route == *self)
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        self.record().map(|r| r.path).unwrap_or(NOT_FOUND_PATH)
    }

    /// 页面标题
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Self::NotFound => Some("页面未找到"),
            _ => self.record().and_then(|r| r.title),
        }
    }

    /// 文档标题：`<页面标题> - <站点名>`
    pub fn document_title(&self) -> String {
        match self.title() {
            Some(title) => format!("{} - {}", title, SITE_TITLE),
            None => SITE_TITLE.to_string(),
        }
    }

    /// 底部标签栏的一级页面，其他页面显示返回按钮
    pub fn is_tab(&self) -> bool {
        matches!(self, Self::Index | Self::Team | Self::User)
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_distinct() {
        let paths: HashSet<_> = ROUTES.iter().map(|r| r.path).collect();
        assert_eq!(paths.len(), ROUTES.len());
    }

    #[test]
    fn test_each_route_declared_once() {
        let routes: HashSet<_> = ROUTES.iter().map(|r| r.route).collect();
        assert_eq!(routes.len(), ROUTES.len());
        assert!(!routes.contains(&AppRoute::NotFound));
    }

    #[test]
    fn test_declared_paths() {
        let paths: Vec<_> = ROUTES.iter().map(|r| r.path).collect();
        for expected in [
            "/",
            "/user",
            "/user/edit",
            "/user/list",
            "/user/login",
            "/user/register",
            "/user/update",
            "/user/team/join",
            "/user/team/create",
            "/team",
            "/search",
            "/team/add",
            "/team/update",
        ] {
            assert!(paths.contains(&expected), "missing route {}", expected);
        }
        assert_eq!(paths.len(), 13);
    }

    #[test]
    fn test_path_roundtrip() {
        for r in ROUTES {
            assert_eq!(AppRoute::from_path(r.path), r.route);
            assert_eq!(r.route.to_path(), r.path);
        }
    }

    #[test]
    fn test_from_path_ignores_query_and_trailing_slash() {
        assert_eq!(
            AppRoute::from_path("/user/login?redirect=http://x/team"),
            AppRoute::UserLogin
        );
        assert_eq!(AppRoute::from_path("/team/"), AppRoute::Team);
        assert_eq!(AppRoute::from_path("/user/list#top"), AppRoute::UserList);
        assert_eq!(AppRoute::from_path(""), AppRoute::Index);
    }

    #[test]
    fn test_unknown_path() {
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::NotFound.to_path(), "/404");
    }

    #[test]
    fn test_titles() {
        assert_eq!(AppRoute::Team.title(), Some("找队伍"));
        assert_eq!(AppRoute::Index.document_title(), "主页 - 伙伴匹配");
        assert!(AppRoute::User.is_tab());
        assert!(!AppRoute::UserEdit.is_tab());
    }
}
