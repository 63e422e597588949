use anyhow::Result;
use axum::http::StatusCode;
use serde_json::{Value, json};

use rigdex_core::api_routes::{utils, v1};

#[path = "support/mod.rs"]
mod support;
use support::{build_test_app, create_named, id_of};

fn names(page: &Value) -> Vec<String> {
    page["content"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|row| row["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn named_pages_sort_by_name() -> Result<()> {
    let app = build_test_app()?;
    for name in ["PCIe 5.0", "PCIe 3.0", "PCIe 4.0"] {
        create_named(&app.server, "pci-express-connector-versions", name).await;
    }
    let pageable = utils::pageable("pci-express-connector-versions");

    let first: Value = app
        .server
        .get(&utils::with_query(&pageable, &[("page", "0"), ("size", "2")]))
        .await
        .json();
    assert_eq!(names(&first), ["PCIe 3.0", "PCIe 4.0"]);
    assert_eq!(first["number"], 0);
    assert_eq!(first["size"], 2);
    assert_eq!(first["numberOfElements"], 2);
    assert_eq!(first["totalElements"], 3);
    assert_eq!(first["totalPages"], 2);
    assert_eq!(first["first"], true);
    assert_eq!(first["last"], false);
    assert_eq!(first["empty"], false);

    let second: Value = app
        .server
        .get(&utils::with_query(&pageable, &[("page", "1"), ("size", "2")]))
        .await
        .json();
    assert_eq!(names(&second), ["PCIe 5.0"]);
    assert_eq!(second["last"], true);

    let descending: Value = app
        .server
        .get(&utils::with_query(&pageable, &[("direction", "DESC")]))
        .await
        .json();
    assert_eq!(names(&descending), ["PCIe 5.0", "PCIe 4.0", "PCIe 3.0"]);
    Ok(())
}

#[tokio::test]
async fn page_past_the_end_is_empty() -> Result<()> {
    let app = build_test_app()?;
    create_named(&app.server, "sockets", "AM5").await;

    let page: Value = app
        .server
        .get(&utils::with_query(v1::sockets::PAGEABLE, &[("page", "4")]))
        .await
        .json();
    assert_eq!(page["content"], json!([]));
    assert_eq!(page["empty"], true);
    assert_eq!(page["totalElements"], 1);
    Ok(())
}

#[tokio::test]
async fn chipsets_page_by_name_then_socket() -> Result<()> {
    let app = build_test_app()?;
    let lga1700 = create_named(&app.server, "sockets", "LGA 1700").await;
    let lga1851 = create_named(&app.server, "sockets", "LGA 1851").await;
    for (name, socket) in [("Z890", &lga1851), ("B760", &lga1700), ("B760", &lga1851)]
    {
        app.server
            .post(v1::chipsets::COLLECTION)
            .json(&json!({ "name": name, "socketId": id_of(socket) }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let page: Value = app.server.get(v1::chipsets::PAGEABLE).await.json();
    let rows: Vec<(String, String)> = page["content"]
        .as_array()
        .into_iter()
        .flatten()
        .map(|row| {
            (
                row["name"].as_str().unwrap_or_default().to_string(),
                row["socket"]["name"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    assert_eq!(
        rows,
        [
            ("B760".to_string(), "LGA 1700".to_string()),
            ("B760".to_string(), "LGA 1851".to_string()),
            ("Z890".to_string(), "LGA 1851".to_string()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn fan_sizes_page_by_dimensions() -> Result<()> {
    let app = build_test_app()?;
    for (l, w, h) in [(140, 140, 25), (80, 80, 25), (120, 120, 25)] {
        app.server
            .post(v1::fan_sizes::COLLECTION)
            .json(&json!({ "length": l, "width": w, "height": h }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let page: Value = app
        .server
        .get(&utils::with_query(v1::fan_sizes::PAGEABLE, &[("size", "2")]))
        .await
        .json();
    let lengths: Vec<_> = page["content"]
        .as_array()
        .into_iter()
        .flatten()
        .map(|row| row["length"].clone())
        .collect();
    assert_eq!(lengths, [json!(80), json!(120)]);
    assert_eq!(page["totalPages"], 2);
    Ok(())
}

#[tokio::test]
async fn bad_parameters_are_named() -> Result<()> {
    let app = build_test_app()?;

    let response = app
        .server
        .get(&utils::with_query(
            v1::vendors::PAGEABLE,
            &[("page", "minus-one"), ("size", "500"), ("direction", "sideways")],
        ))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let params: Vec<_> = body["violations"]
        .as_array()
        .into_iter()
        .flatten()
        .map(|violation| violation["paramNames"][0].clone())
        .collect();
    assert_eq!(params, [json!("page"), json!("size"), json!("direction")]);
    Ok(())
}
