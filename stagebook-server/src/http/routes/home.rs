//! Landing document

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
pub struct Section {
    pub title: &'static str,
    pub list: &'static str,
    pub create: &'static str,
}

/// Landing response
#[derive(Serialize)]
pub struct HomeResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub sections: [Section; 3],
}

/// GET /
async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        name: "stagebook",
        version: env!("CARGO_PKG_VERSION"),
        sections: [
            Section {
                title: "Venues",
                list: "/venues",
                create: "/venues/create",
            },
            Section {
                title: "Artists",
                list: "/artists",
                create: "/artists/create",
            },
            Section {
                title: "Shows",
                list: "/shows",
                create: "/shows/create",
            },
        ],
    })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(home))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::http::routes::testing::{app, get};

    #[tokio::test]
    async fn landing_links_every_section() {
        let (app, _) = app();
        let (status, body) = get(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "stagebook");
        let lists: Vec<&str> = body["sections"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["list"].as_str().unwrap())
            .collect();
        assert_eq!(lists, vec!["/venues", "/artists", "/shows"]);
    }
}
