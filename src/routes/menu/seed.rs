use crate::db::PgPool;
use crate::db_models::MenuItem;
use crate::errors::custom::{CustomError, DbError};
use crate::schema::{menus, restaurants};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use rust_decimal::Decimal;
use tracing::instrument;

struct SeedRestaurant {
    name: &'static str,
    address: &'static str,
    phone: &'static str,
    description: &'static str,
    // (name, description, price in cents, category)
    menus: &'static [(&'static str, &'static str, i64, &'static str)],
}

const SEED: &[SeedRestaurant] = &[
    SeedRestaurant {
        name: "Baan Somtum",
        address: "12 Sathorn Soi 9, Bangkok",
        phone: "021234567",
        description: "Isan street food",
        menus: &[
            ("Som Tum Thai", "Green papaya salad", 1000, "Salad"),
            ("Gai Yang", "Grilled chicken", 1500, "Grill"),
        ],
    },
    SeedRestaurant {
        name: "Noodle House",
        address: "88 Ratchada Rd, Bangkok",
        phone: "029876543",
        description: "Boat noodles and more",
        menus: &[
            ("Boat Noodles", "Rich pork broth", 1999, "Noodles"),
            ("Thai Iced Tea", "Sweetened with condensed milk", 450, "Drinks"),
        ],
    },
];

/******************************************/
// Adding seed data to menus table
/******************************************/
/// Inserts the demo restaurants and menus unless menus already exist.
/// Returns every menu row present afterwards.
#[instrument(name = "Seed menus", skip(pool))]
pub async fn seed_menus(pool: &PgPool) -> Result<Vec<MenuItem>, CustomError> {
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    conn.transaction::<_, CustomError, _>(|conn| {
        async move {
            let existing: i64 = menus::table.count().get_result(conn).await?;
            if existing == 0 {
                for restaurant in SEED {
                    let restaurant_id = diesel::insert_into(restaurants::table)
                        .values((
                            restaurants::restaurant_name.eq(restaurant.name),
                            restaurants::address.eq(restaurant.address),
                            restaurants::phone.eq(restaurant.phone),
                            restaurants::menu_description.eq(Some(restaurant.description)),
                        ))
                        .returning(restaurants::id)
                        .get_result::<i32>(conn)
                        .await?;

                    for (name, description, cents, category) in restaurant.menus {
                        diesel::insert_into(menus::table)
                            .values((
                                menus::restaurant_id.eq(restaurant_id),
                                menus::menu_name.eq(*name),
                                menus::description.eq(Some(*description)),
                                menus::price.eq(Decimal::new(*cents, 2)),
                                menus::category.eq(*category),
                            ))
                            .execute(conn)
                            .await?;
                    }
                }
                tracing::info!("Seeded demo restaurants and menus");
            }

            let rows = menus::table
                .order(menus::id.asc())
                .select(MenuItem::as_select())
                .load(conn)
                .await?;
            Ok(rows)
        }
        .scope_boxed()
    })
    .await
}
