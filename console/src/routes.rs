//! Route table of the console.
//!
//! The table is static data. It answers two questions: which route a
//! concrete path lands on (used to reject unknown post-write navigation
//! targets), and which entries the side menu shows.

use std::collections::BTreeMap;

/// Path of the login view.
pub const LOGIN_PATH: &str = "/login";
/// Path the console opens on once signed in.
pub const HOME_PATH: &str = "/workbench";
/// Path of the asset list.
pub const ASSETS_PATH: &str = "/assets";

/// What a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteView {
    /// Shell layout whose children render inside it.
    Layout,
    /// A view, named by its module.
    Page(&'static str),
    /// Redirect to another path.
    Redirect(&'static str),
}

/// Presentation metadata of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteMeta {
    /// Menu and tab title.
    pub title: Option<&'static str>,
    /// Icon identifier.
    pub icon: Option<&'static str>,
    /// Whether the route's tab cannot be closed.
    pub affix: bool,
    /// Menu position; lower comes first.
    pub order: Option<u32>,
    /// Whether the route is left out of the menu.
    pub hidden: bool,
}

impl RouteMeta {
    const fn empty() -> Self {
        Self {
            title: None,
            icon: None,
            affix: false,
            order: None,
            hidden: false,
        }
    }

    const fn ordered(order: u32) -> Self {
        Self {
            order: Some(order),
            ..Self::empty()
        }
    }

    const fn tab(title: &'static str, icon: &'static str) -> Self {
        Self {
            title: Some(title),
            icon: Some(icon),
            affix: true,
            ..Self::empty()
        }
    }
}

/// One node of the route tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteNode {
    /// Absolute path for roots, relative path for children (`""` is the
    /// parent's own path; `:name` segments capture parameters).
    pub path: &'static str,
    /// Route name.
    pub name: &'static str,
    /// What the route renders.
    pub view: RouteView,
    /// Presentation metadata.
    pub meta: RouteMeta,
    /// Nested routes.
    pub children: &'static [RouteNode],
}

const QUIZ_ICON: &str = "fluent:quiz-20-regular";
const WORKBENCH_ICON: &str = "icon-park-outline:workbench";

const fn leaf(path: &'static str, name: &'static str, view: &'static str, meta: RouteMeta) -> RouteNode {
    RouteNode {
        path,
        name,
        view: RouteView::Page(view),
        meta,
        children: &[],
    }
}

static CONSOLE_ROUTES: [RouteNode; 8] = [
    RouteNode {
        path: "/",
        name: "Root",
        view: RouteView::Redirect(HOME_PATH),
        meta: RouteMeta::ordered(0),
        children: &[],
    },
    RouteNode {
        path: HOME_PATH,
        name: "WorkbenchLayout",
        view: RouteView::Layout,
        meta: RouteMeta::ordered(1),
        children: &[leaf(
            "",
            "Workbench",
            "workbench",
            RouteMeta::tab("Workbench", WORKBENCH_ICON),
        )],
    },
    RouteNode {
        path: LOGIN_PATH,
        name: "Login",
        view: RouteView::Page("login"),
        meta: RouteMeta {
            hidden: true,
            ..RouteMeta::empty()
        },
        children: &[],
    },
    RouteNode {
        path: ASSETS_PATH,
        name: "AssetsLayout",
        view: RouteView::Layout,
        meta: RouteMeta::ordered(2),
        children: &[
            leaf("", "Assets", "asset", RouteMeta::tab("Assets", QUIZ_ICON)),
            leaf(
                "create",
                "Asset Create",
                "asset/create",
                RouteMeta::tab("Asset Create", QUIZ_ICON),
            ),
            leaf(
                "edit/:id",
                "Asset Edit",
                "asset/edit",
                RouteMeta {
                    title: Some("Asset Edit"),
                    ..RouteMeta::empty()
                },
            ),
        ],
    },
    RouteNode {
        path: "/system",
        name: "SystemLayout",
        view: RouteView::Layout,
        meta: RouteMeta::ordered(5),
        children: &[leaf(
            "",
            "System",
            "system",
            RouteMeta::tab("System Default", WORKBENCH_ICON),
        )],
    },
    RouteNode {
        path: "/profile",
        name: "ProfileLayout",
        view: RouteView::Layout,
        meta: RouteMeta {
            order: Some(99),
            hidden: true,
            ..RouteMeta::empty()
        },
        children: &[leaf("", "Profile", "profile", RouteMeta::tab("Profile", "user"))],
    },
    RouteNode {
        path: "/user",
        name: "PeopleLayout",
        view: RouteView::Layout,
        meta: RouteMeta::ordered(2),
        children: &[leaf("", "People", "user", RouteMeta::tab("People", QUIZ_ICON))],
    },
    RouteNode {
        path: "/settings",
        name: "SettingsLayout",
        view: RouteView::Layout,
        meta: RouteMeta {
            title: Some("Settings"),
            order: Some(2),
            ..RouteMeta::empty()
        },
        children: &[
            leaf(
                "categories",
                "Categories",
                "settings/categories",
                RouteMeta::tab("Categories", QUIZ_ICON),
            ),
            leaf(
                "manufacturers",
                "Manufacturers",
                "settings/manufacturers",
                RouteMeta::tab("Manufacturers", QUIZ_ICON),
            ),
            leaf(
                "suppliers",
                "Suppliers",
                "settings/suppliers",
                RouteMeta::tab("Suppliers", QUIZ_ICON),
            ),
            leaf(
                "departments",
                "Departments",
                "settings/departments",
                RouteMeta::tab("Departments", QUIZ_ICON),
            ),
        ],
    },
];

/// A concrete path resolved against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Name of the matched route.
    pub name: &'static str,
    /// Normalised path that was matched, after following redirects.
    pub path: String,
    /// Captured `:param` segments.
    pub params: BTreeMap<String, String>,
}

/// Entry of the side menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Displayed title.
    pub title: &'static str,
    /// Target path.
    pub path: String,
    /// Icon identifier.
    pub icon: Option<&'static str>,
    /// Nested entries of a group.
    pub children: Vec<MenuEntry>,
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

fn join(parent: &str, child: &str) -> String {
    let mut all = segments(parent);
    all.extend(segments(child));
    format!("/{}", all.join("/"))
}

fn match_pattern(pattern: &[&str], path: &[&str]) -> Option<BTreeMap<String, String>> {
    if pattern.len() != path.len() {
        return None;
    }
    let mut params = BTreeMap::new();
    for (expected, actual) in pattern.iter().zip(path) {
        match expected.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_owned(), (*actual).to_owned());
            }
            None if expected == actual => {}
            None => return None,
        }
    }
    Some(params)
}

/// Lookup structure over a static route tree.
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    roots: &'static [RouteNode],
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::console()
    }
}

impl RouteTable {
    /// The console's own routes.
    pub fn console() -> Self {
        Self::new(&CONSOLE_ROUTES)
    }

    /// Table over arbitrary roots.
    pub const fn new(roots: &'static [RouteNode]) -> Self {
        Self { roots }
    }

    /// Top-level routes in declaration order.
    pub fn roots(&self) -> &'static [RouteNode] {
        self.roots
    }

    /// Resolve a concrete path such as `/assets/edit/7`.
    ///
    /// Query strings and fragments are ignored. Redirects are followed once.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        self.resolve_inner(path, true)
    }

    fn resolve_inner(&self, path: &str, follow_redirects: bool) -> Option<RouteMatch> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let wanted = segments(path);
        for root in self.roots {
            let candidates: Vec<(&RouteNode, String)> = if root.children.is_empty() {
                vec![(root, root.path.to_owned())]
            } else {
                root.children
                    .iter()
                    .map(|child| (child, join(root.path, child.path)))
                    .collect()
            };
            for (node, pattern) in candidates {
                let Some(params) = match_pattern(&segments(&pattern), &wanted) else {
                    continue;
                };
                if let RouteView::Redirect(target) = node.view {
                    return if follow_redirects {
                        self.resolve_inner(target, false)
                    } else {
                        None
                    };
                }
                return Some(RouteMatch {
                    name: node.name,
                    path: format!("/{}", wanted.join("/")),
                    params,
                });
            }
        }
        None
    }

    /// Visible top-level entries ordered by `order` (ties keep declaration
    /// order; unordered routes go last).
    ///
    /// Roots with a title become groups of their titled, parameter-free
    /// children; other roots become a single entry for their index child.
    pub fn menu(&self) -> Vec<MenuEntry> {
        let mut roots: Vec<&RouteNode> = self
            .roots
            .iter()
            .filter(|root| !root.meta.hidden && !matches!(root.view, RouteView::Redirect(_)))
            .collect();
        roots.sort_by_key(|root| root.meta.order.unwrap_or(u32::MAX));

        roots
            .into_iter()
            .filter_map(|root| match root.meta.title {
                Some(title) => Some(MenuEntry {
                    title,
                    path: root.path.to_owned(),
                    icon: root.meta.icon,
                    children: root
                        .children
                        .iter()
                        .filter(|child| !child.meta.hidden && !child.path.contains(':'))
                        .filter_map(|child| {
                            child.meta.title.map(|title| MenuEntry {
                                title,
                                path: join(root.path, child.path),
                                icon: child.meta.icon,
                                children: Vec::new(),
                            })
                        })
                        .collect(),
                }),
                None => root
                    .children
                    .iter()
                    .find(|child| child.path.is_empty())
                    .and_then(|index| {
                        index.meta.title.map(|title| MenuEntry {
                            title,
                            path: root.path.to_owned(),
                            icon: index.meta.icon,
                            children: Vec::new(),
                        })
                    }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn table() -> RouteTable {
        RouteTable::console()
    }

    #[rstest]
    #[case("/workbench", "Workbench")]
    #[case("/assets", "Assets")]
    #[case("/assets/", "Assets")]
    #[case("/assets/create", "Asset Create")]
    #[case("/settings/categories", "Categories")]
    #[case("/user", "People")]
    #[case("/login?next=/assets", "Login")]
    fn resolves_known_paths(table: RouteTable, #[case] path: &str, #[case] name: &str) {
        assert_eq!(table.resolve(path).map(|m| m.name), Some(name));
    }

    #[rstest]
    fn captures_path_parameters(table: RouteTable) {
        let matched = table.resolve("/assets/edit/42").expect("edit route");
        assert_eq!(matched.name, "Asset Edit");
        assert_eq!(matched.params.get("id").map(String::as_str), Some("42"));
    }

    #[rstest]
    fn root_redirects_to_the_workbench(table: RouteTable) {
        let matched = table.resolve("/").expect("root resolves");
        assert_eq!(matched.name, "Workbench");
        assert_eq!(matched.path, HOME_PATH);
    }

    #[rstest]
    #[case("/nowhere")]
    #[case("/assets/edit")]
    #[case("/settings")]
    fn rejects_unknown_paths(table: RouteTable, #[case] path: &str) {
        assert!(table.resolve(path).is_none());
    }

    #[rstest]
    fn menu_is_ordered_and_hides_hidden_routes(table: RouteTable) {
        let menu = table.menu();
        let titles: Vec<_> = menu.iter().map(|entry| entry.title).collect();

        assert_eq!(titles, ["Workbench", "Assets", "People", "Settings", "System Default"]);
        let settings = &menu[3];
        assert_eq!(settings.children.len(), 4);
        assert_eq!(settings.children[0].path, "/settings/categories");
    }
}
