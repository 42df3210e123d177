//! Built-in categories and stock sub-category sets.

use super::model::{Category, SubCategory};

fn sub(id: &str, name: &str, icon: &str) -> SubCategory {
    SubCategory::new(id, name, icon)
}

fn dev_stack(id: &str, name: &str, icon: &str, fourth: SubCategory) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        resource_types: vec![
            sub("libraries", "开发库", "fa-book"),
            sub("frameworks", "框架", "fa-layer-group"),
            sub("tools", "开发工具", "fa-tools"),
            fourth,
        ],
    }
}

/// The fixed categories every shelf starts with, in display order.
pub fn builtin_categories() -> Vec<Category> {
    vec![
        Category {
            id: "common".to_string(),
            name: "通用素材".to_string(),
            icon: "fa-shapes".to_string(),
            resource_types: vec![
                sub("fonts", "字体资源", "fa-font"),
                sub("images", "图片素材", "fa-images"),
                sub("icons", "图标资源", "fa-icons"),
                sub("music", "音频素材", "fa-music"),
                sub("videos", "视频素材", "fa-video"),
                sub("colors", "配色方案", "fa-palette"),
                sub("animations", "动画资源", "fa-film"),
            ],
        },
        dev_stack(
            "frontend",
            "前端开发",
            "fa-code",
            sub("tutorials", "教程文档", "fa-book-reader"),
        ),
        dev_stack(
            "backend",
            "后端开发",
            "fa-server",
            sub("apis", "API文档", "fa-file-code"),
        ),
        dev_stack(
            "mobile",
            "移动开发",
            "fa-mobile-alt",
            sub("tutorials", "教程文档", "fa-book-reader"),
        ),
        dev_stack(
            "desktop",
            "桌面开发",
            "fa-desktop",
            sub("tutorials", "教程文档", "fa-book-reader"),
        ),
    ]
}

/// Sub-categories given to a new custom category that opts into defaults.
pub fn default_sub_categories() -> Vec<SubCategory> {
    vec![
        sub("libraries", "开发库", "fa-book"),
        sub("frameworks", "框架", "fa-layer-group"),
        sub("tools", "开发工具", "fa-wrench"),
        sub("tutorials", "教程文档", "fa-book-open"),
        sub("apis", "API文档", "fa-plug"),
        sub("rules", "开发规则", "fa-list-check"),
        sub("templates", "项目模板", "fa-copy"),
        sub("packages", "依赖包", "fa-box"),
        sub("other", "其他资源", "fa-circle-plus"),
    ]
}

/// The single sub-category synthesized when a custom category declares none.
pub fn fallback_sub_category() -> SubCategory {
    sub("other", "其他资源", "fa-file")
}

/// Display names for well-known sub-category ids that no registered category
/// declares (e.g. ids carried in by an import).
pub(crate) fn known_sub_category_name(id: &str) -> Option<&'static str> {
    let name = match id {
        "libraries" => "开发库",
        "frameworks" => "框架",
        "tools" => "开发工具",
        "tutorials" => "教程文档",
        "apis" => "API文档",
        "rules" => "开发规则",
        "templates" => "项目模板",
        "packages" => "依赖包",
        "fonts" => "字体资源",
        "images" => "图片素材",
        "icons" => "图标资源",
        "music" => "音频素材",
        "videos" => "视频素材",
        "colors" => "配色方案",
        "animations" => "动画资源",
        "illustrations" => "插画素材",
        "other" => "其他资源",
        _ => return None,
    };
    Some(name)
}
