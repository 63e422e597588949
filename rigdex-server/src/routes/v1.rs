use axum::{Extension, Router, routing::get};

use rigdex_core::api_routes::v1::resource;
use rigdex_model::DictionaryKind;

use crate::AppState;
use crate::handlers::{
    dictionary::{
        create_entry, delete_entry, get_entry, list_entries, page_entries,
        patch_entry, replace_entry,
    },
    fan_sizes::{
        self, create_fan_size, delete_fan_size, get_fan_size, list_fan_sizes,
        page_fan_sizes, patch_fan_size, replace_fan_size,
    },
    linked::{
        Chipsets, Designs, LinkedResource, create_linked, delete_linked,
        get_linked, list_linked, page_linked, patch_linked, replace_linked,
    },
};

/// Create all v1 API routes
pub fn create_v1_router() -> Router<AppState> {
    let mut router = Router::new()
        .merge(linked_routes::<Chipsets>())
        .merge(linked_routes::<Designs>())
        .merge(fan_size_routes());

    for kind in DictionaryKind::ALL {
        router = router.merge(dictionary_routes(kind));
    }

    router
}

fn paths(segment: &str) -> (String, String, String) {
    (
        format!("/{segment}"),
        format!("/{segment}{}", resource::PAGEABLE),
        format!("/{segment}{}", resource::ITEM),
    )
}

fn dictionary_routes(kind: DictionaryKind) -> Router<AppState> {
    let (collection, pageable, item) = paths(kind.segment());
    Router::new()
        .route(&collection, get(list_entries).post(create_entry))
        .route(&pageable, get(page_entries))
        .route(
            &item,
            get(get_entry)
                .put(replace_entry)
                .patch(patch_entry)
                .delete(delete_entry),
        )
        .layer(Extension(kind))
}

fn linked_routes<R: LinkedResource>() -> Router<AppState> {
    let (collection, pageable, item) = paths(R::KIND.segment());
    Router::new()
        .route(&collection, get(list_linked::<R>).post(create_linked::<R>))
        .route(&pageable, get(page_linked::<R>))
        .route(
            &item,
            get(get_linked::<R>)
                .put(replace_linked::<R>)
                .patch(patch_linked::<R>)
                .delete(delete_linked::<R>),
        )
}

fn fan_size_routes() -> Router<AppState> {
    let (collection, pageable, item) = paths(fan_sizes::SEGMENT);
    Router::new()
        .route(&collection, get(list_fan_sizes).post(create_fan_size))
        .route(&pageable, get(page_fan_sizes))
        .route(
            &item,
            get(get_fan_size)
                .put(replace_fan_size)
                .patch(patch_fan_size)
                .delete(delete_fan_size),
        )
}
