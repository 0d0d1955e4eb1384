use crate::presentation::admin::views::{
    AdminBrandView, AdminChrome, AdminMetaView, AdminNavigationItemView, AdminNavigationView,
};

const NAV_ITEMS: &[(&str, &str)] = &[("/", "Dashboard"), ("/news", "News")];

#[derive(Clone)]
pub struct AdminChromeService {
    brand_title: String,
    environment: String,
}

impl AdminChromeService {
    pub fn new(brand_title: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            brand_title: brand_title.into(),
            environment: environment.into(),
        }
    }

    /// Build the page chrome, marking the navigation entry that owns `active_path`.
    pub fn load(&self, active_path: &str) -> AdminChrome {
        let brand = AdminBrandView {
            title: self.brand_title.clone(),
            environment: self.environment.clone(),
        };

        let items: Vec<AdminNavigationItemView> = NAV_ITEMS
            .iter()
            .map(|(href, label)| AdminNavigationItemView {
                label: (*label).to_string(),
                href: (*href).to_string(),
                is_active: is_active(href, active_path),
            })
            .collect();

        let navigation = AdminNavigationView { items };

        let active_label = navigation
            .items
            .iter()
            .find(|item| item.is_active)
            .map(|item| item.label.as_str())
            .unwrap_or("Dashboard");

        let meta = AdminMetaView {
            title: format!("{} · {}", brand.title, active_label),
            description: "News and announcements administration".to_string(),
        };

        AdminChrome {
            brand,
            navigation,
            meta,
        }
    }
}

fn is_active(href: &str, active_path: &str) -> bool {
    if href == "/" {
        active_path == "/"
    } else {
        active_path == href || active_path.starts_with(&format!("{href}/"))
    }
}
