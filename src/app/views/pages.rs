//! # Pages
//!
//! Each route maps to a view-model variant that declares exactly the data it
//! needs, and a render function turning it into markup. Rendering takes an
//! optional entrance animation class so the same view can produce both the
//! animated and the static markup a transition needs.

use super::document::ANNOUNCEMENT_ID;
use super::markup::{escape, with_animation};
use crate::app::events::{AuthStep, RouteName};
use crate::app::models::{
    Announcement, AuthFlowState, Comment, ContentCatalog, ContentItem, MediaKind, Route,
    SessionUser,
};
use std::fmt::Write;
use std::str::FromStr;

/// The fixed category grid: (name, icon class)
pub const CATEGORIES: &[(&str, &str)] = &[
    ("纯爱系", "ri-heart-line"),
    ("猎奇/致郁", "ri-emotion-sad-line"),
    ("幻想/科幻", "ri-sword-line"),
    ("剧情向", "ri-book-line"),
    ("同人/汉化", "ri-group-line"),
    ("游戏工具", "ri-tools-line"),
];

/// Alert raised by the aggregate search page
pub const GAL_SEARCH_ALERT: &str = "正在调用后端搜索接口...";

// Detail page controls backed by a mock service
pub const DOWNLOAD_ALERT: &str = "调用下载接口";
pub const REPORT_INVALID_ALERT: &str = "调用举报失效接口";
pub const FEEDBACK_ALERT: &str = "调用反馈问题接口";
pub const UPLOAD_ALERT: &str = "打开文件上传窗口";
pub const COMMENT_ALERT: &str = "调用评论发送接口";

pub fn category_alert(name: &str) -> String {
    format!("进入 {name} 分类")
}

/// Entries of the account menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountSetting {
    Avatar,
    Nickname,
    Email,
    Password,
}

impl AccountSetting {
    pub const ALL: [AccountSetting; 4] = [
        AccountSetting::Avatar,
        AccountSetting::Nickname,
        AccountSetting::Email,
        AccountSetting::Password,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountSetting::Avatar => "avatar",
            AccountSetting::Nickname => "nickname",
            AccountSetting::Email => "email",
            AccountSetting::Password => "password",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AccountSetting::Avatar => "修改头像",
            AccountSetting::Nickname => "修改昵称",
            AccountSetting::Email => r#"绑定邮箱 <span class="text-green-500">已绑定</span>"#,
            AccountSetting::Password => "修改密码",
        }
    }

    pub fn alert(&self) -> &'static str {
        match self {
            AccountSetting::Avatar => "需实现修改头像功能",
            AccountSetting::Nickname => "需实现修改昵称功能",
            AccountSetting::Email => "邮箱已绑定",
            AccountSetting::Password => "需实现修改密码功能",
        }
    }
}

impl FromStr for AccountSetting {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountSetting::ALL
            .into_iter()
            .find(|setting| setting.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown account setting '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: u32,
    pub title: String,
    pub cover: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub cards: Vec<CardView>,
    pub announcement: Announcement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthView {
    pub step: AuthStep,
    pub email: String,
    pub is_registered: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileView {
    Auth(AuthView),
    Account(SessionUser),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub item: ContentItem,
    pub logged_in: bool,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Home(HomeView),
    Category,
    Galgame,
    Profile(ProfileView),
    Detail(DetailView),
    /// Detail route whose id matches nothing
    NotFound,
    /// Unrecognised route name
    Empty,
}

impl PageView {
    pub fn build(route: &Route, catalog: &ContentCatalog, auth: &AuthFlowState) -> Self {
        match &route.name {
            RouteName::Home => PageView::Home(HomeView {
                cards: catalog
                    .resources()
                    .iter()
                    .map(|item| CardView {
                        id: item.id,
                        title: item.title.clone(),
                        cover: item.cover.clone(),
                        tags: item.tags.clone(),
                    })
                    .collect(),
                announcement: catalog.announcement().clone(),
            }),
            RouteName::Category => PageView::Category,
            RouteName::Galgame => PageView::Galgame,
            RouteName::Profile => match catalog.session() {
                Some(user) => PageView::Profile(ProfileView::Account(user.clone())),
                None => PageView::Profile(ProfileView::Auth(AuthView {
                    step: auth.step(),
                    email: auth.email().to_string(),
                    is_registered: auth.is_registered(),
                })),
            },
            RouteName::Detail => match route.content_id().and_then(|id| catalog.find_item(id)) {
                Some(item) => PageView::Detail(DetailView {
                    item: item.clone(),
                    logged_in: catalog.is_logged_in(),
                    comments: catalog.comments().to_vec(),
                }),
                None => PageView::NotFound,
            },
            RouteName::Unknown(_) => PageView::Empty,
        }
    }

    /// Render with an optional entrance animation class
    pub fn render(&self, animation: Option<&str>) -> String {
        match self {
            PageView::Home(view) => render_home(view, animation),
            PageView::Category => render_category(animation),
            PageView::Galgame => render_galgame(animation),
            PageView::Profile(ProfileView::Auth(view)) => render_auth(view),
            PageView::Profile(ProfileView::Account(user)) => render_account(user, animation),
            // detail always fades in on its own
            PageView::Detail(view) => render_detail(view),
            PageView::NotFound => r#"<div class="p-10 text-center">未找到资源</div>"#.to_string(),
            PageView::Empty => String::new(),
        }
    }
}

fn render_home(view: &HomeView, animation: Option<&str>) -> String {
    let mut cards = String::new();
    for card in &view.cards {
        let tags: String = card
            .tags
            .iter()
            .map(|t| format!(r#"<span class="tag-chip">{}</span>"#, escape(t)))
            .collect();
        let _ = write!(
            cards,
            r#"<div data-route="detail" data-id="{id}" class="glass-card game-card"><img src="{cover}" loading="lazy"><h3 class="font-bold text-xl">{title}</h3><div class="flex gap-2">{tags}</div></div>"#,
            id = card.id,
            cover = escape(&card.cover),
            title = escape(&card.title),
        );
    }
    let announcement = &view.announcement;
    format!(
        r#"<div class="{classes}"><div class="glass-card p-4"><span>最新推荐</span><span class="badge">NEW</span></div><div class="game-cards-container">{cards}</div></div><div id="{ANNOUNCEMENT_ID}" class="hidden announcement-overlay"><div class="glass-card"><img src="{image}" loading="lazy" alt="公告图片"><h2 class="text-xl font-bold">{title}</h2><p class="text-sm">{content}</p><button id="announcement-close">我知道了</button></div></div>"#,
        classes = with_animation(animation, "space-y-5 pt-20"),
        image = escape(&announcement.image),
        title = escape(&announcement.title),
        content = escape(&announcement.content),
    )
}

fn render_category(animation: Option<&str>) -> String {
    let tiles: String = CATEGORIES
        .iter()
        .map(|(name, icon)| {
            format!(
                r#"<div class="glass-card category-tile" data-category="{name}"><i class="{icon} text-2xl"></i><span class="font-bold">{name}</span></div>"#
            )
        })
        .collect();
    format!(
        r#"<div class="{classes}"><h2 class="text-xl font-bold">Gal 分类</h2><div class="grid gap-4 grid-cols-2">{tiles}</div></div>"#,
        classes = with_animation(animation, "pt-20"),
    )
}

fn render_galgame(animation: Option<&str>) -> String {
    format!(
        r#"<div class="{classes}"><div class="glass-card wide-card"><h2 class="text-2xl font-bold">Niypher引力搜索</h2><p class="text-xs">聚合搜索全网 Galgame 资源</p><input type="text" id="gal-search" placeholder="输入游戏原名或中文名..."><button id="gal-search-btn">搜索</button></div><p class="text-xs">Source: 基于外部开源数据源 https://github.com/Moe-Sakura/SearchGal</p></div>"#,
        classes = with_animation(animation, "flex flex-col items-center pt-20"),
    )
}

fn step_class(active: bool) -> &'static str {
    if active {
        "text-pink-600"
    } else {
        "text-gray-500"
    }
}

fn render_auth(view: &AuthView) -> String {
    let on_credentials = view.step == AuthStep::CredentialEntry;
    // the card carries its own per-step animation
    let card_animation = if on_credentials {
        "animate-fade-in-right"
    } else {
        "animate-slide-in-left"
    };
    let step_two_label = match (on_credentials, view.is_registered) {
        (true, true) => "登录",
        (true, false) => "注册",
        (false, _) => "注册/登录",
    };
    let email = escape(&view.email);

    let mut markup = format!(
        r#"<div class="flex flex-col items-center pt-20"><h2 class="text-2xl font-bold">匿影通行证</h2><div class="{card_animation} glass-card responsive-card"><div class="step-indicator"><span class="{s1}">1 邮箱</span><span class="{s2}">2 {step_two_label}</span></div>"#,
        s1 = step_class(true),
        s2 = step_class(on_credentials),
    );

    if on_credentials {
        let _ = write!(
            markup,
            r#"<div id="step-2"><button id="auth-back-btn"><i class="ri-arrow-left-line"></i><span>返回邮箱</span></button><p class="text-sm font-medium">{email}</p><input type="password" id="auth-pwd1" placeholder="{placeholder}">"#,
            placeholder = if view.is_registered { "密码" } else { "设置密码" },
        );
        if !view.is_registered {
            markup.push_str(concat!(
                r#"<div id="password-feedback">"#,
                r#"<div id="check-length">至少8位</div>"#,
                r#"<div id="check-upper">至少1个大写字母</div>"#,
                r#"<div id="check-lower">至少1个小写字母</div>"#,
                r#"<div id="check-number">至少1个数字</div>"#,
                r#"<div id="check-special">至少1个特殊字符</div>"#,
                r#"</div>"#,
                r#"<input type="password" id="auth-pwd2" placeholder="重复密码">"#,
                r#"<p id="pwd-match-error" class="hidden">两次输入的密码不一致</p>"#,
            ));
        }
        let _ = write!(
            markup,
            r#"<div class="cf-turnstile" data-theme="light"></div><button id="auth-action-btn" disabled>{action}</button>"#,
            action = if view.is_registered { "登录" } else { "注册" },
        );
        if view.is_registered {
            markup.push_str(r##"<p class="text-xs">忘记密码？<a href="#">点击重置</a></p>"##);
        }
        markup.push_str("</div>");
    } else {
        let _ = write!(
            markup,
            r#"<div id="step-1"><input type="email" id="auth-email" placeholder="邮箱" value="{email}"><p id="email-error" class="hidden">请正确输入邮箱格式</p><button id="email-next-btn" disabled>下一步</button><p class="text-xs">输入您的邮箱，我们将帮您选择合适的登录方式</p></div>"#
        );
    }

    markup.push_str(
        r#"<p class="text-xs">若出现问题，请联系管理员：<span>feedback@niypher.com</span></p></div></div>"#,
    );
    markup
}

fn render_account(user: &SessionUser, animation: Option<&str>) -> String {
    let initial: String = user.name.chars().take(1).collect();
    let menu: String = AccountSetting::ALL
        .iter()
        .map(|setting| {
            format!(
                r#"<div data-setting="{}">{}</div>"#,
                setting.as_str(),
                setting.label()
            )
        })
        .collect();
    format!(
        r#"<div class="{classes}"><div class="glass-card account-card"><div class="avatar">{initial}</div><h2 class="text-xl font-bold">{name}</h2><p class="text-xs">{email}</p></div><div class="glass-card account-menu">{menu}</div><button id="logout-btn" class="text-red-500 font-bold">退出登录</button></div>"#,
        classes = with_animation(animation, "space-y-6 pt-20"),
        initial = escape(&initial),
        name = escape(&user.name),
        email = escape(&user.email),
    )
}

fn render_detail(view: &DetailView) -> String {
    let item = &view.item;
    let mut markup = format!(
        r#"<div class="animate-fade-in pb-10 pt-20"><div class="detail-header"><button data-route="home"><i class="ri-arrow-left-line"></i></button><span class="font-bold truncate">{title}</span></div><div class="glass-card"><img src="{cover}" loading="lazy"><h1 class="text-2xl font-bold">{title}</h1><div class="flex flex-wrap gap-2">"#,
        title = escape(&item.title),
        cover = escape(&item.cover),
    );
    for tag in &item.tags {
        let _ = write!(markup, r#"<span class="tag">{}</span>"#, escape(tag));
    }
    let _ = write!(
        markup,
        r#"</div><div class="intro"><h3 class="font-bold">游戏简介</h3>{}</div>"#,
        escape(&item.intro)
    );

    if !item.media.is_empty() {
        markup.push_str(r#"<div class="media-scroll-container">"#);
        for (index, media) in item.media.iter().enumerate() {
            match media.kind {
                MediaKind::Image => {
                    let _ = write!(
                        markup,
                        r#"<div class="media-item"><img src="{}" loading="lazy" alt="游戏截图 {}"></div>"#,
                        escape(&media.url),
                        index + 1
                    );
                }
                MediaKind::Video => {
                    let _ = write!(
                        markup,
                        r#"<div class="media-item"><iframe src="{}" allowfullscreen></iframe></div>"#,
                        escape(&media.url)
                    );
                }
            }
        }
        markup.push_str(r#"</div><p class="text-xs">可左右滑动切换</p>"#);
    }
    markup.push_str("</div>");

    markup.push_str(r#"<div class="glass-card"><h3 class="font-bold">资源下载</h3>"#);
    if !view.logged_in {
        markup.push_str(
            r#"<div class="download-locked"><i class="ri-lock-2-line"></i><p>登录后查看下载链接</p><button data-route="profile">去登录</button></div>"#,
        );
    } else if item.versions.is_empty() {
        markup.push_str(r#"<p class="text-xs">暂无资源版本</p>"#);
    } else {
        for (index, version) in item.versions.iter().enumerate() {
            let _ = write!(
                markup,
                r#"<div class="version-row" data-version="{index}"><span class="font-bold">{ver}</span><span class="text-xs">更新于 {date} · 大小 {size}</span><button class="download-btn">下载</button><button class="report-btn">举报失效</button><button class="feedback-btn">反馈问题</button></div>"#,
                ver = escape(&version.ver),
                date = escape(&version.date),
                size = escape(&version.size)
            );
        }
    }
    markup.push_str("</div>");

    markup.push_str(r#"<div class="glass-card"><h3 class="font-bold">贡献上传</h3>"#);
    if view.logged_in {
        markup.push_str(
            r#"<div id="upload-drop"><span class="text-xs font-bold">点击上传该游戏的新版本</span><span class="text-xs">需管理员审核</span></div>"#,
        );
    } else {
        markup.push_str(r#"<p class="text-xs">登录后可提交新版本。</p>"#);
    }
    markup.push_str("</div>");

    markup.push_str(r#"<div class="glass-card"><h3 class="font-bold">评论交流</h3><div class="space-y-5">"#);
    for comment in &view.comments {
        let _ = write!(
            markup,
            r#"<div class="comment"><div class="text-xs font-bold">{}</div><p class="text-sm">{}</p></div>"#,
            escape(&comment.user),
            escape(&comment.text)
        );
    }
    markup.push_str(
        r#"</div><input type="text" id="comment-input" placeholder="友善评论..."><button id="comment-send">发送</button></div></div>"#,
    );
    markup
}
