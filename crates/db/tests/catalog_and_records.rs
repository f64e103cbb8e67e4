//! Integration tests for the seeded service catalog and medical records.

use chrono::NaiveDate;
use petclinic_core::medical_record::RecordType;
use petclinic_db::models::medical_record::CreateMedicalRecord;
use petclinic_db::models::pet::CreatePet;
use petclinic_db::repositories::{MedicalRecordRepo, PetRepo, ServiceRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_seeded_catalog(pool: PgPool) {
    let services = ServiceRepo::list_active(&pool).await.unwrap();
    let names: Vec<_> = services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Consulta General",
            "Vacunación",
            "Estética Canina",
            "Cirugía Menor",
            "Desparasitación"
        ]
    );
    assert_eq!(services[0].price_cents, 5000);
    assert_eq!(services[2].includes.len(), 4);

    let first = ServiceRepo::find_active_by_id(&pool, services[0].id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.duration_label, "30 min");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_inactive_service_is_not_bookable(pool: PgPool) {
    let services = ServiceRepo::list_active(&pool).await.unwrap();
    let id = services[3].id;
    sqlx::query("UPDATE services SET is_active = false WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    assert!(ServiceRepo::find_active_by_id(&pool, id).await.unwrap().is_none());
    assert!(ServiceRepo::find_by_id(&pool, id).await.unwrap().is_some());
    assert_eq!(ServiceRepo::list_active(&pool).await.unwrap().len(), 4);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_medical_records_newest_first(pool: PgPool) {
    let pet = PetRepo::create(
        &pool,
        None,
        &CreatePet {
            name: "Max".to_string(),
            species: "Perro".to_string(),
            breed: None,
            age_years: 5,
            weight_kg: None,
        },
    )
    .await
    .unwrap();

    for (day, record_type, title) in [
        (3, RecordType::Checkup, "Control anual"),
        (20, RecordType::Vaccine, "Rabia"),
    ] {
        let recorded_on = NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
        let input = CreateMedicalRecord {
            pet_id: pet.id,
            record_type,
            title: title.to_string(),
            description: "Sin complicaciones".to_string(),
            recorded_on,
            next_due_on: None,
            notes: None,
        };
        MedicalRecordRepo::create(&pool, &input).await.unwrap().unwrap();
    }

    let records = MedicalRecordRepo::list_for_pet(&pool, pet.id).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Rabia");
    assert_eq!(records[0].record_type, RecordType::Vaccine);

    let orphan = CreateMedicalRecord {
        pet_id: 999_999,
        record_type: RecordType::Other,
        title: "x".to_string(),
        description: "y".to_string(),
        recorded_on: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        next_due_on: None,
        notes: None,
    };
    assert!(MedicalRecordRepo::create(&pool, &orphan).await.unwrap().is_none());
}
