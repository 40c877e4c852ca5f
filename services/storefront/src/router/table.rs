use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, OnceLock};

use percent_encoding::percent_decode_str;
use regex::Regex;

use ecommerce_common::error::AppErrorCode;

use crate::constant::{hard_limit, roles};
use crate::error::AppError;

/// Declared route, immutable once the navigation table is built. Child
/// paths are absolute, nesting only expresses the layout hierarchy.
#[derive(Debug, Clone, Default)]
pub struct RouteDescriptor {
    pub path: String,
    pub name: Option<String>,
    pub view: Option<String>,
    pub title: Option<String>,
    pub required_roles: Option<HashSet<String>>,
    pub redirect: Option<String>,
    pub children: Vec<RouteDescriptor>,
}

impl RouteDescriptor {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Default::default()
        }
    }
    pub fn name(mut self, v: &str) -> Self {
        self.name = Some(v.to_string());
        self
    }
    pub fn view(mut self, v: &str) -> Self {
        self.view = Some(v.to_string());
        self
    }
    pub fn title(mut self, v: &str) -> Self {
        self.title = Some(v.to_string());
        self
    }
    pub fn roles(mut self, v: &[&str]) -> Self {
        let set = v.iter().map(|r| r.to_string()).collect::<HashSet<_>>();
        self.required_roles = Some(set);
        self
    }
    pub fn redirect(mut self, to: &str) -> Self {
        self.redirect = Some(to.to_string());
        self
    }
    pub fn children(mut self, v: Vec<RouteDescriptor>) -> Self {
        self.children = v;
        self
    }
}

/// Outcome of path resolution after all redirects are followed
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    /// normalized path of the final route
    pub path: String,
    pub params: BTreeMap<String, String>,
    /// first path which was redirected, if any
    pub redirected_from: Option<String>,
    leaf: Arc<RouteDescriptor>,
    ancestors: Vec<Arc<RouteDescriptor>>,
}

impl ResolvedRoute {
    pub fn route(&self) -> &RouteDescriptor {
        self.leaf.as_ref()
    }

    /// matched routes from the outermost layout down to the leaf
    pub fn matched(&self) -> Vec<&RouteDescriptor> {
        self.ancestors
            .iter()
            .chain(Some(&self.leaf))
            .map(|r| r.as_ref())
            .collect()
    }

    fn nearest<'a, T, F>(&'a self, f: F) -> Option<&'a T>
    where
        T: ?Sized,
        F: Fn(&'a RouteDescriptor) -> Option<&'a T>,
    {
        f(self.leaf.as_ref()).or_else(|| self.ancestors.iter().rev().find_map(|r| f(r.as_ref())))
    }

    // like route metadata merging, the closest declaration wins
    pub fn title(&self) -> Option<&str> {
        self.nearest(|r| r.title.as_deref())
    }
    pub fn required_roles(&self) -> Option<&HashSet<String>> {
        self.nearest(|r| r.required_roles.as_ref())
    }
    pub fn view(&self) -> Option<&str> {
        self.leaf.view.as_deref()
    }
}

struct CompiledRoute {
    desc: Arc<RouteDescriptor>,
    pattern: Regex,
    children: Vec<CompiledRoute>,
}

pub struct NavigationTable {
    routes: Vec<CompiledRoute>,
}

fn param_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)(?:\(((?:[^()]|\([^()]*\))*)\))?").unwrap()
    })
}

/// Strip query string, fragment and trailing slash
pub fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let p = raw[..end].trim_end_matches('/');
    if p.is_empty() {
        "/".to_string()
    } else if p.starts_with('/') {
        p.to_string()
    } else {
        format!("/{p}")
    }
}

fn compile_pattern(path: &str) -> Result<Regex, AppError> {
    let path = normalize_path(path);
    let mut expr = String::from("^");
    let mut last = 0usize;
    for cap in param_regex().captures_iter(path.as_str()) {
        let (whole, name) = match (cap.get(0), cap.get(1)) {
            (Some(w), Some(n)) => (w, n.as_str()),
            _others => continue,
        };
        expr += regex::escape(&path[last..whole.start()]).as_str();
        let inner = cap.get(2).map_or("[^/]+", |m| m.as_str());
        expr += format!("(?P<{name}>{inner})").as_str();
        last = whole.end();
    }
    expr += regex::escape(&path[last..]).as_str();
    expr.push('$');
    Regex::new(expr.as_str()).map_err(|e| AppError {
        code: AppErrorCode::InvalidRoutePattern,
        detail: Some(format!("path:{path}, {e}")),
    })
}

// a capture which is not valid UTF-8 after decoding is kept as it is
fn decode_param(raw: &str) -> String {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|v| v.into_owned())
        .unwrap_or_else(|_e| raw.to_string())
}

impl CompiledRoute {
    fn try_from_desc(mut desc: RouteDescriptor) -> Result<Self, AppError> {
        let pattern = compile_pattern(desc.path.as_str())?;
        let children = desc
            .children
            .iter()
            .cloned()
            .map(Self::try_from_desc)
            .collect::<Result<Vec<_>, AppError>>()?;
        desc.path = normalize_path(desc.path.as_str());
        Ok(Self {
            desc: Arc::new(desc),
            pattern,
            children,
        })
    }

    fn extract_params(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let caps = self.pattern.captures(path)?;
        let params = self
            .pattern
            .capture_names()
            .flatten()
            .filter_map(|n| caps.name(n).map(|m| (n.to_string(), decode_param(m.as_str()))))
            .collect();
        Some(params)
    }
}

impl NavigationTable {
    pub fn new(routes: Vec<RouteDescriptor>) -> Result<Self, AppError> {
        let routes = routes
            .into_iter()
            .map(CompiledRoute::try_from_desc)
            .collect::<Result<Vec<_>, AppError>>()?;
        Ok(Self { routes })
    }

    // depth-first in declaration order, the first match wins
    fn match_nodes(
        nodes: &[CompiledRoute],
        path: &str,
        chain: &mut Vec<Arc<RouteDescriptor>>,
    ) -> Option<BTreeMap<String, String>> {
        for node in nodes {
            if let Some(params) = node.extract_params(path) {
                chain.push(node.desc.clone());
                return Some(params);
            }
            chain.push(node.desc.clone());
            if let Some(params) = Self::match_nodes(&node.children, path, chain) {
                return Some(params);
            }
            let _ = chain.pop();
        }
        None
    }

    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute, AppError> {
        let mut current = normalize_path(path);
        let mut redirected_from = None;
        for _ in 0..=hard_limit::MAX_NUM_REDIRECTS {
            let mut chain = Vec::new();
            let params =
                Self::match_nodes(&self.routes, current.as_str(), &mut chain).ok_or_else(|| {
                    AppError {
                        code: AppErrorCode::InvalidInput,
                        detail: Some(format!("no-route-matched, path:{current}")),
                    }
                })?;
            let leaf = match chain.pop() {
                Some(r) => r,
                None => break,
            };
            if let Some(to) = leaf.redirect.as_ref() {
                if redirected_from.is_none() {
                    redirected_from = Some(current.clone());
                }
                current = normalize_path(to.as_str());
                continue;
            }
            return Ok(ResolvedRoute {
                path: current,
                params,
                redirected_from,
                leaf,
                ancestors: chain,
            });
        }
        Err(AppError {
            code: AppErrorCode::RedirectLoop,
            detail: Some(format!("path:{path}, last:{current}")),
        })
    } // end of fn resolve

    /// Route table of the storefront
    pub fn storefront() -> Result<Self, AppError> {
        let home_children = vec![
            RouteDescriptor::new("/dashboard")
                .name("Dashboard")
                .view("user/Dashboard")
                .title("个人信息"),
            RouteDescriptor::new("/product/all_product")
                .view("product/all_product")
                .title("商品总览"),
            RouteDescriptor::new("/advertisement/all_advertisement")
                .name("AllAdvertisements")
                .view("advertisement/all_advertisement")
                .title("广告列表"),
            RouteDescriptor::new("/cart")
                .view("cart/cart")
                .title("购物车"),
            RouteDescriptor::new("/coupon/all_coupon")
                .view("coupon/all_coupon")
                .title("优惠券列表"),
            // must precede `/product/:id`, otherwise shadowed by it
            RouteDescriptor::new("/product/create_product")
                .name("createProduct")
                .view("product/create_product")
                .title("创建商品"),
            RouteDescriptor::new("/product/:id")
                .name("SingleProduct")
                .view("product/single_product")
                .title("商品详情"),
            RouteDescriptor::new("/advertisement/create_advertisement")
                .name("CreateAdvertisement")
                .view("advertisement/create_advertisement")
                .title("创建广告")
                .roles(&[roles::MANAGER]),
            RouteDescriptor::new("/advertisement/:advId")
                .name("SingleAdvertisement")
                .view("advertisement/single_advertisement")
                .title("广告详情"),
        ];
        let routes = vec![
            RouteDescriptor::new("/").redirect("/login"),
            RouteDescriptor::new("/login")
                .view("user/Login")
                .title("用户登录"),
            RouteDescriptor::new("/register")
                .view("user/Register")
                .title("用户注册"),
            RouteDescriptor::new("/home")
                .view("Home")
                .redirect("/dashboard")
                .children(home_children),
            RouteDescriptor::new("/order/:id")
                .name("Order")
                .view("order/orders")
                .title("订单详情"),
            RouteDescriptor::new("/404")
                .name("404")
                .view("NotFound")
                .title("404"),
            RouteDescriptor::new("/:catchAll(.*)").redirect("/404"),
        ];
        Self::new(routes)
    }
} // end of impl NavigationTable
