//! Provisions a database with sample content for local development.

use chrono::{NaiveDate, NaiveTime};
use clap::Parser;
use corpbot_db::MIGRATIONS;
use corpbot_db::canteen::{Canteen, CanteenMenu, MenuFileType};
use corpbot_db::company::CompanyInfo;
use corpbot_db::excursions::{ExcursionMaterial, VirtualExcursion};
use corpbot_db::faq::{Faq, FaqKeyword};
use corpbot_db::schema::users;
use corpbot_db::users::User;
use diesel::prelude::*;
use diesel_migrations::MigrationHarness;

#[derive(Parser)]
pub struct Seed {
    database_url: Option<String>,
    #[clap(long, short, action)]
    faq: bool,
    #[clap(long, short, action)]
    canteen: bool,
    #[clap(long, short, action)]
    excursions: bool,
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = Seed::parse();
    let db_url = if let Some(url) = args.database_url {
        url
    } else {
        std::env::var("DATABASE_URL").expect(
            "please either set `DATABASE_URL` or pass the database url as \
             the first argument",
        )
    };

    let mut conn = diesel::SqliteConnection::establish(&db_url).unwrap();

    diesel::sql_query("PRAGMA foreign_keys = ON;")
        .execute(&mut conn)
        .unwrap();
    conn.run_pending_migrations(MIGRATIONS).unwrap();

    if users::table
        .filter(users::is_admin.eq(true))
        .count()
        .get_result::<i64>(&mut conn)
        .unwrap()
        == 0
    {
        User::create(1, "Admin", "Admin", "Admin", "0000", true, &mut conn)
            .unwrap();
        tracing::info!("created admin user with pin 0000");
    }

    CompanyInfo::create(
        "About the company",
        Some("We build industrial automation systems."),
        None,
        None,
        &mut conn,
    )
    .unwrap();

    if args.faq {
        let entry = Faq::create(
            "Where is the office?",
            "Main street 1, floors 3-5.",
            Some("general"),
            &mut conn,
        )
        .unwrap();
        for word in ["office", "address", "location"] {
            FaqKeyword::create(&entry.id, word, &mut conn).unwrap();
        }
    }

    if args.canteen {
        Canteen::create(
            NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            Some("Third floor, next to the elevators"),
            &mut conn,
        )
        .unwrap();
        CanteenMenu::create(
            NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            Some("sample-menu"),
            Some(MenuFileType::Photo),
            Some("Soup of the day, two mains, salad bar"),
            &mut conn,
        )
        .unwrap();
    }

    if args.excursions {
        let tour =
            VirtualExcursion::create("Office tour", None, &mut conn).unwrap();
        ExcursionMaterial::create(
            &tour.id,
            "Lobby",
            None,
            Some("Reception and badge printing"),
            &mut conn,
        )
        .unwrap();
    }

    tracing::info!("seed data written to {db_url}");
}
