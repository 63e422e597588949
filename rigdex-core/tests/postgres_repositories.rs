#![cfg(feature = "e2e")]

use std::sync::Arc;

use rigdex_core::CatalogError;
use rigdex_core::CatalogUnitOfWork;
use rigdex_core::database::PostgresDatabase;
use rigdex_core::database::ports::dictionary::DictionaryRepository;
use rigdex_core::database::ports::health::StoreHealth;
use rigdex_model::{
    DictionaryKind, FanSizeDraft, LinkedDraft, LinkedKind, NamedDraft,
    PageRequest, SortDirection,
};
use sqlx::PgPool;

fn unit_of_work(pool: PgPool) -> CatalogUnitOfWork {
    CatalogUnitOfWork::from_postgres(Arc::new(PostgresDatabase::from_pool(pool)))
}

#[sqlx::test(migrator = "rigdex_core::MIGRATOR")]
async fn dictionary_rows_round_trip(pool: PgPool) -> anyhow::Result<()> {
    let uow = unit_of_work(pool);
    let service = uow.dictionary_service();
    let kind = DictionaryKind::PciExpressConnectorVersion;

    let gen4 = service.create(kind, NamedDraft::named("PCIe 4.0")).await?;
    let gen5 = service.create(kind, NamedDraft::named("PCIe 5.0")).await?;

    assert_eq!(service.list(kind).await?, vec![gen4.clone(), gen5.clone()]);

    let renamed = service
        .patch(kind, gen4.id, NamedDraft::named("PCIe 4.0 x16"))
        .await?;
    assert_eq!(service.get(kind, gen4.id).await?, renamed);

    service.delete(kind, gen5.id).await?;
    assert_eq!(service.count(kind).await?, 1);
    Ok(())
}

#[sqlx::test(migrator = "rigdex_core::MIGRATOR")]
async fn unique_constraint_surfaces_as_conflict(
    pool: PgPool,
) -> anyhow::Result<()> {
    let uow = unit_of_work(pool);
    let entry = rigdex_model::DictionaryEntry::new("AM5");
    uow.dictionaries.insert(DictionaryKind::Socket, &entry).await?;

    let err = uow
        .dictionaries
        .insert(
            DictionaryKind::Socket,
            &rigdex_model::DictionaryEntry::new("AM5"),
        )
        .await
        .unwrap_err();

    match err {
        CatalogError::Conflict(constraint) => {
            assert_eq!(constraint, "sockets_name_key")
        }
        other => panic!("expected conflict, got {other:?}"),
    }
    Ok(())
}

#[sqlx::test(migrator = "rigdex_core::MIGRATOR")]
async fn chipsets_join_their_socket_and_cascade(
    pool: PgPool,
) -> anyhow::Result<()> {
    let uow = unit_of_work(pool);
    let sockets = uow.dictionary_service();
    let chipsets = uow.linked_service();

    let am5 = sockets
        .create(DictionaryKind::Socket, NamedDraft::named("AM5"))
        .await?;
    let lga1700 = sockets
        .create(DictionaryKind::Socket, NamedDraft::named("LGA 1700"))
        .await?;
    chipsets
        .create(LinkedKind::Chipset, LinkedDraft::new("X670E", am5.id))
        .await?;
    let b660 = chipsets
        .create(LinkedKind::Chipset, LinkedDraft::new("B660", lga1700.id))
        .await?;
    assert_eq!(b660.parent.name, "LGA 1700");

    let page = chipsets
        .page(
            LinkedKind::Chipset,
            PageRequest::new(0, 1).with_direction(SortDirection::Desc),
        )
        .await?;
    assert_eq!(page.content[0].name, "X670E");
    assert_eq!(page.total_pages, 2);

    sockets.delete(DictionaryKind::Socket, am5.id).await?;
    let remaining = chipsets.list(LinkedKind::Chipset).await?;
    assert_eq!(remaining, vec![b660]);
    Ok(())
}

#[sqlx::test(migrator = "rigdex_core::MIGRATOR")]
async fn fan_sizes_page_by_dimensions(pool: PgPool) -> anyhow::Result<()> {
    let uow = unit_of_work(pool);
    let service = uow.fan_size_service();
    for (l, w, h) in [(140, 140, 25), (120, 120, 25), (120, 120, 15)] {
        service.create(FanSizeDraft::new(l, w, h)).await?;
    }

    let page = service.page(PageRequest::new(0, 2)).await?;
    let dims: Vec<_> = page.content.iter().map(|f| f.dimensions()).collect();
    assert_eq!(dims, [(120, 120, 15), (120, 120, 25)]);
    assert!(!page.last);

    let err = service
        .create(FanSizeDraft::new(120, 120, 25))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Invalid(_)));
    Ok(())
}

#[sqlx::test(migrator = "rigdex_core::MIGRATOR")]
async fn ping_reaches_the_server(pool: PgPool) -> anyhow::Result<()> {
    PostgresDatabase::from_pool(pool).ping().await?;
    Ok(())
}
