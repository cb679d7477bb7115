//! PostgreSQL repository tests
//!
//! Each test gets its own migrated container, so Docker must be available.
//! Set `CATTERY_SKIP_DB_TESTS=1` to skip them.

use core_kernel::{BreedId, KittenId, PortError};
use domain_cattery::{BreedRepository, KittenChanges, KittenRepository};
use infra_db::repositories::{PostgresBreedRepository, PostgresKittenRepository};
use test_utils::{db_test, insert_breed, insert_kitten, BreedFixtures, KittenBuilder};

db_test!(test_create_loads_breed, |pool| {
    let breed = insert_breed(&pool, BreedFixtures::SIAMESE).await.unwrap();
    let repo = PostgresKittenRepository::new(pool.clone());

    let kitten = repo.create(KittenBuilder::new(breed.id).fields()).await.unwrap();

    assert_eq!(kitten.breed, breed);
    assert_eq!(kitten.description, "Fluffy");
});

db_test!(test_create_with_missing_breed_reports_detail, |pool| {
    let repo = PostgresKittenRepository::new(pool.clone());

    let error = repo
        .create(KittenBuilder::new(BreedId::new(999)).fields())
        .await
        .unwrap_err();

    match error {
        PortError::ForeignKeyViolation { constraint, detail } => {
            assert_eq!(constraint.as_deref(), Some("kittens_breed_id_fkey"));
            assert_eq!(detail, "Key (breed_id)=(999) is not present in table \"breeds\".");
        }
        other => panic!("Expected foreign key violation, got {other:?}"),
    }
});

db_test!(test_get_missing_returns_none, |pool| {
    let repo = PostgresKittenRepository::new(pool.clone());
    assert!(repo.get_by_id(KittenId::new(42)).await.unwrap().is_none());
});

db_test!(test_list_filters_by_breed, |pool| {
    let siamese = insert_breed(&pool, BreedFixtures::SIAMESE).await.unwrap();
    let persian = insert_breed(&pool, BreedFixtures::PERSIAN).await.unwrap();
    let first = insert_kitten(&pool, &KittenBuilder::new(siamese.id).fields()).await.unwrap();
    insert_kitten(&pool, &KittenBuilder::new(persian.id).fields()).await.unwrap();
    let repo = PostgresKittenRepository::new(pool.clone());

    assert_eq!(repo.list(None).await.unwrap().len(), 2);

    let filtered = repo.list(Some(siamese.id)).await.unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, first);
    assert_eq!(filtered[0].breed.name, BreedFixtures::SIAMESE);
});

db_test!(test_partial_update_keeps_omitted_columns, |pool| {
    let breed = insert_breed(&pool, BreedFixtures::SIAMESE).await.unwrap();
    let id = insert_kitten(&pool, &KittenBuilder::new(breed.id).fields()).await.unwrap();
    let repo = PostgresKittenRepository::new(pool.clone());

    let changes = KittenChanges {
        age: Some(2),
        description: Some("Mittens".to_string()),
        ..Default::default()
    };
    let kitten = repo.partial_update(id, changes).await.unwrap().unwrap();

    assert_eq!(kitten.age, 2);
    assert_eq!(kitten.description, "Mittens");
    assert_eq!(kitten.color, "black");
});

db_test!(test_concurrent_disjoint_patches_both_survive, |pool| {
    let breed = insert_breed(&pool, BreedFixtures::SIAMESE).await.unwrap();
    let id = insert_kitten(&pool, &KittenBuilder::new(breed.id).fields()).await.unwrap();
    let repo = PostgresKittenRepository::new(pool.clone());

    for round in 2..12 {
        let age = KittenChanges {
            age: Some(round),
            ..Default::default()
        };
        let color = KittenChanges {
            color: Some(format!("white-{round}")),
            ..Default::default()
        };

        let (aged, recolored) = tokio::join!(
            repo.partial_update(id, age),
            repo.partial_update(id, color),
        );
        aged.unwrap().unwrap();
        recolored.unwrap().unwrap();

        let kitten = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(kitten.age, round);
        assert_eq!(kitten.color, format!("white-{round}"));
    }
});

db_test!(test_full_update_switches_breed, |pool| {
    let siamese = insert_breed(&pool, BreedFixtures::SIAMESE).await.unwrap();
    let persian = insert_breed(&pool, BreedFixtures::PERSIAN).await.unwrap();
    let id = insert_kitten(&pool, &KittenBuilder::new(siamese.id).fields()).await.unwrap();
    let repo = PostgresKittenRepository::new(pool.clone());

    let replacement = KittenBuilder::new(persian.id).color("white").age(2).description("Mittens");
    let kitten = repo.full_update(id, replacement.fields()).await.unwrap().unwrap();

    assert_eq!(kitten.fields(), replacement.fields());
    assert_eq!(kitten.breed, persian);
});

db_test!(test_update_missing_returns_none, |pool| {
    let breed = insert_breed(&pool, BreedFixtures::SIAMESE).await.unwrap();
    let repo = PostgresKittenRepository::new(pool.clone());

    let result = repo
        .full_update(KittenId::new(7), KittenBuilder::new(breed.id).fields())
        .await
        .unwrap();
    assert!(result.is_none());
});

db_test!(test_failed_update_rolls_back, |pool| {
    let breed = insert_breed(&pool, BreedFixtures::SIAMESE).await.unwrap();
    let id = insert_kitten(&pool, &KittenBuilder::new(breed.id).fields()).await.unwrap();
    let repo = PostgresKittenRepository::new(pool.clone());

    let changes = KittenChanges {
        color: Some("white".to_string()),
        breed_id: Some(BreedId::new(999)),
        ..Default::default()
    };
    let error = repo.partial_update(id, changes).await.unwrap_err();
    assert!(error.is_foreign_key_violation());

    let kitten = repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(kitten.color, "black");
});

db_test!(test_delete_twice, |pool| {
    let breed = insert_breed(&pool, BreedFixtures::SIAMESE).await.unwrap();
    let id = insert_kitten(&pool, &KittenBuilder::new(breed.id).fields()).await.unwrap();
    let repo = PostgresKittenRepository::new(pool.clone());

    assert!(repo.delete(id).await.unwrap());
    assert!(!repo.delete(id).await.unwrap());
});

db_test!(test_list_breeds_in_id_order, |pool| {
    let first = insert_breed(&pool, BreedFixtures::MAINE_COON).await.unwrap();
    let second = insert_breed(&pool, BreedFixtures::PERSIAN).await.unwrap();
    let repo = PostgresBreedRepository::new(pool.clone());

    assert_eq!(repo.list_all().await.unwrap(), vec![first, second]);
});

db_test!(test_breed_names_are_unique, |pool| {
    insert_breed(&pool, BreedFixtures::SIAMESE).await.unwrap();
    let error = insert_breed(&pool, BreedFixtures::SIAMESE).await.unwrap_err();

    let classified = infra_db::DatabaseError::from(error);
    assert!(matches!(classified, infra_db::DatabaseError::DuplicateEntry { .. }));
});
