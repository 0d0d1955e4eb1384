use askama::Template;

#[derive(Clone)]
pub struct AdminBrandView {
    pub title: String,
    pub environment: String,
}

#[derive(Clone)]
pub struct AdminNavigationItemView {
    pub label: String,
    pub href: String,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct AdminNavigationView {
    pub items: Vec<AdminNavigationItemView>,
}

#[derive(Clone)]
pub struct AdminMetaView {
    pub title: String,
    pub description: String,
}

#[derive(Clone)]
pub struct AdminChrome {
    pub brand: AdminBrandView,
    pub navigation: AdminNavigationView,
    pub meta: AdminMetaView,
}

/// One-shot banner shown above the page content.
#[derive(Clone)]
pub struct AdminFlashView {
    pub kind: &'static str,
    pub text: String,
}

#[derive(Clone)]
pub struct AdminLayout<T> {
    pub chrome: AdminChrome,
    pub asset_version: String,
    pub flash: Option<AdminFlashView>,
    pub content: T,
}

impl<T> AdminLayout<T> {
    pub fn new(chrome: AdminChrome, content: T) -> Self {
        Self {
            chrome,
            asset_version: asset_version(),
            flash: None,
            content,
        }
    }

    pub fn with_flash(mut self, flash: Option<AdminFlashView>) -> Self {
        self.flash = flash;
        self
    }

    pub fn has_flash(&self) -> bool {
        self.flash.is_some()
    }

    pub fn flash_kind(&self) -> &str {
        self.flash.as_ref().map(|flash| flash.kind).unwrap_or("")
    }

    pub fn flash_text(&self) -> &str {
        self.flash
            .as_ref()
            .map(|flash| flash.text.as_str())
            .unwrap_or("")
    }
}

fn asset_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[derive(Clone)]
pub struct AdminMetricView {
    pub label: String,
    pub value: u64,
    pub href: String,
}

#[derive(Clone)]
pub struct AdminDashboardView {
    pub title: String,
    pub metrics: Vec<AdminMetricView>,
    pub recent: Vec<AdminNewsRowView>,
    pub empty_message: String,
}

impl AdminDashboardView {
    pub fn has_recent(&self) -> bool {
        !self.recent.is_empty()
    }
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate {
    pub view: AdminLayout<AdminDashboardView>,
}

#[derive(Clone)]
pub struct AdminStatusOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Clone)]
pub struct AdminNewsRowView {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub link: String,
    pub status_key: &'static str,
    pub status_label: &'static str,
    pub created_at: String,
    pub updated_at: String,
    pub edit_href: String,
    pub delete_action: String,
    pub status_action: String,
    pub status_options: Vec<AdminStatusOptionView>,
}

impl AdminNewsRowView {
    pub fn has_link(&self) -> bool {
        !self.link.is_empty()
    }
}

#[derive(Clone)]
pub struct AdminStatusFilterView {
    pub label: String,
    pub href: String,
    pub count: u64,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct AdminPaginationView {
    pub page: u32,
    pub pages: u64,
    pub total: u64,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

impl AdminPaginationView {
    pub fn has_prev(&self) -> bool {
        self.prev_href.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next_href.is_some()
    }

    pub fn prev_link(&self) -> &str {
        self.prev_href.as_deref().unwrap_or("")
    }

    pub fn next_link(&self) -> &str {
        self.next_href.as_deref().unwrap_or("")
    }
}

#[derive(Clone)]
pub struct AdminNewsListView {
    pub heading: String,
    pub filters: Vec<AdminStatusFilterView>,
    pub rows: Vec<AdminNewsRowView>,
    pub filter_status: String,
    pub filter_search: String,
    pub filter_date_from: String,
    pub filter_date_to: String,
    pub status_options: Vec<AdminStatusOptionView>,
    pub pagination: AdminPaginationView,
    pub new_href: String,
    pub empty_message: String,
}

impl AdminNewsListView {
    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }
}

#[derive(Template)]
#[template(path = "admin/news_list.html")]
pub struct AdminNewsListTemplate {
    pub view: AdminLayout<AdminNewsListView>,
}

#[derive(Clone)]
pub struct AdminNewsFormView {
    pub heading: String,
    pub form_action: String,
    pub submit_label: String,
    pub cancel_href: String,
    pub title: String,
    pub content: String,
    pub date: String,
    pub link: String,
    pub status_options: Vec<AdminStatusOptionView>,
    pub error: Option<String>,
}

impl AdminNewsFormView {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error_text(&self) -> &str {
        self.error.as_deref().unwrap_or("")
    }
}

#[derive(Template)]
#[template(path = "admin/news_form.html")]
pub struct AdminNewsFormTemplate {
    pub view: AdminLayout<AdminNewsFormView>,
}

#[derive(Clone)]
pub struct AdminErrorView {
    pub status_code: u16,
    pub title: String,
    pub message: String,
    pub back_href: String,
}

#[derive(Template)]
#[template(path = "admin/error.html")]
pub struct AdminErrorTemplate {
    pub view: AdminLayout<AdminErrorView>,
}
