use super::routes::Route;

/// The API tree: routes grouped into a hierarchy mirroring URL path
/// segments. Routes whose path has no static segments attach directly to the
/// root.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Root {
    pub routes: Vec<Route>,
    pub nodes: Vec<Node>,
}

/// One named node of the tree. Node identity is by segment string only, so
/// two routes sharing a prefix always land under the same node even if their
/// parameter names differ.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub routes: Vec<Route>,
    pub nodes: Vec<Node>,
}

/// Group routes into the path-segment hierarchy.
pub fn build_tree(routes: Vec<Route>) -> Root {
    let mut root = Root::default();
    for route in routes {
        let segments = static_segments(&route.path);
        if segments.is_empty() {
            root.routes.push(route);
        } else {
            insert(&mut root.nodes, &segments, route);
        }
    }
    root
}

fn insert(nodes: &mut Vec<Node>, segments: &[String], route: Route) {
    let name = &segments[0];
    let node = match nodes.iter_mut().position(|n| &n.name == name) {
        Some(i) => &mut nodes[i],
        None => {
            nodes.push(Node {
                name: name.clone(),
                routes: Vec::new(),
                nodes: Vec::new(),
            });
            nodes.last_mut().unwrap()
        }
    };
    if segments.len() == 1 {
        node.routes.push(route);
    } else {
        insert(&mut node.nodes, &segments[1..], route);
    }
}

/// Path segments with `{param}` placeholders stripped out.
/// e.g. `/admin/projects/{id}` → `["admin", "projects"]`
fn static_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty() && !s.starts_with('{'))
        .map(str::to_string)
        .collect()
}
