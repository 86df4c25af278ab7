use sqlx::SqlitePool;

use crate::domain::{MeterReading, NewMeterReading};

const READING_COLUMNS: &str = "uid, date, amount, electrical_meter_uid";

pub async fn reading_by_uid(
    pool: &SqlitePool,
    uid: i64,
) -> Result<Option<MeterReading>, sqlx::Error> {
    sqlx::query_as::<_, MeterReading>(
        "SELECT uid, date, amount, electrical_meter_uid FROM meter_readings WHERE uid = ?1",
    )
    .bind(uid)
    .fetch_optional(pool)
    .await
}

/// List readings, optionally narrowed by date components. A month filter is
/// only honored together with a year, and a day filter only together with a
/// month; stray finer components are ignored.
pub async fn list_readings(
    pool: &SqlitePool,
    year: Option<i32>,
    month: Option<u8>,
    day: Option<u8>,
    skip: i64,
    limit: i64,
) -> Result<Vec<MeterReading>, sqlx::Error> {
    let sql = match (year, month, day) {
        (Some(_), Some(_), Some(_)) => format!(
            "SELECT {READING_COLUMNS} FROM meter_readings \
             WHERE CAST(strftime('%Y', date) AS INTEGER) = ?3 \
               AND CAST(strftime('%m', date) AS INTEGER) = ?4 \
               AND CAST(strftime('%d', date) AS INTEGER) = ?5 \
             ORDER BY uid LIMIT ?1 OFFSET ?2"
        ),
        (Some(_), Some(_), None) => format!(
            "SELECT {READING_COLUMNS} FROM meter_readings \
             WHERE CAST(strftime('%Y', date) AS INTEGER) = ?3 \
               AND CAST(strftime('%m', date) AS INTEGER) = ?4 \
             ORDER BY uid LIMIT ?1 OFFSET ?2"
        ),
        (Some(_), None, _) => format!(
            "SELECT {READING_COLUMNS} FROM meter_readings \
             WHERE CAST(strftime('%Y', date) AS INTEGER) = ?3 \
             ORDER BY uid LIMIT ?1 OFFSET ?2"
        ),
        (None, _, _) => format!(
            "SELECT {READING_COLUMNS} FROM meter_readings ORDER BY uid LIMIT ?1 OFFSET ?2"
        ),
    };

    let mut query = sqlx::query_as::<_, MeterReading>(&sql).bind(limit).bind(skip);
    if let Some(y) = year {
        query = query.bind(i64::from(y));
        if let Some(m) = month {
            query = query.bind(i64::from(m));
            if let Some(d) = day {
                query = query.bind(i64::from(d));
            }
        }
    }

    query.fetch_all(pool).await
}

/// All readings recorded by one meter, newest last.
pub async fn readings_of_meter(
    pool: &SqlitePool,
    electrical_meter_uid: i64,
) -> Result<Vec<MeterReading>, sqlx::Error> {
    sqlx::query_as::<_, MeterReading>(
        "SELECT uid, date, amount, electrical_meter_uid FROM meter_readings \
         WHERE electrical_meter_uid = ?1 ORDER BY date, uid",
    )
    .bind(electrical_meter_uid)
    .fetch_all(pool)
    .await
}

/// Readings of one meter whose date falls within the given calendar month,
/// all days inclusive. This is the read path of invoice computation.
pub async fn readings_for_month(
    pool: &SqlitePool,
    electrical_meter_uid: i64,
    year: i32,
    month: u8,
) -> Result<Vec<MeterReading>, sqlx::Error> {
    sqlx::query_as::<_, MeterReading>(
        "SELECT uid, date, amount, electrical_meter_uid FROM meter_readings \
         WHERE electrical_meter_uid = ?1 \
           AND CAST(strftime('%Y', date) AS INTEGER) = ?2 \
           AND CAST(strftime('%m', date) AS INTEGER) = ?3 \
         ORDER BY date, uid",
    )
    .bind(electrical_meter_uid)
    .bind(i64::from(year))
    .bind(i64::from(month))
    .fetch_all(pool)
    .await
}

pub async fn insert_reading(
    pool: &SqlitePool,
    new: &NewMeterReading,
) -> Result<MeterReading, sqlx::Error> {
    sqlx::query_as::<_, MeterReading>(
        "INSERT INTO meter_readings (date, amount, electrical_meter_uid) VALUES (?1, ?2, ?3) \
         RETURNING uid, date, amount, electrical_meter_uid",
    )
    .bind(new.date)
    .bind(new.amount)
    .bind(new.electrical_meter_uid)
    .fetch_one(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;
    use crate::db::{insert_factory, insert_meter, insert_producer};
    use crate::domain::{NewElectricalMeter, NewEnergyProducer, NewFactory};
    use time::macros::date;
    use time::Date;

    async fn seed_meter(pool: &SqlitePool) -> i64 {
        let producer = insert_producer(
            pool,
            &NewEnergyProducer {
                name: "edf".to_string(),
            },
        )
        .await
        .unwrap();
        let factory = insert_factory(
            pool,
            &NewFactory {
                name: "ED_Cha_1".to_string(),
                owner_uid: producer.uid,
            },
        )
        .await
        .unwrap();
        insert_meter(
            pool,
            &NewElectricalMeter {
                name: "em1".to_string(),
                is_producer: true,
                factory_uid: factory.uid,
            },
        )
        .await
        .unwrap()
        .uid
    }

    async fn seed_reading(pool: &SqlitePool, meter_uid: i64, day: Date, amount: f64) {
        insert_reading(
            pool,
            &NewMeterReading {
                date: day,
                amount,
                electrical_meter_uid: meter_uid,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn date_component_filters_narrow_progressively() {
        let pool = memory_pool().await;
        let meter = seed_meter(&pool).await;

        seed_reading(&pool, meter, date!(2022 - 12 - 01), 100.0).await;
        seed_reading(&pool, meter, date!(2022 - 12 - 02), 200.0).await;
        seed_reading(&pool, meter, date!(2022 - 11 - 01), 300.0).await;
        seed_reading(&pool, meter, date!(2021 - 12 - 01), 400.0).await;

        let by_year = list_readings(&pool, Some(2022), None, None, 0, 100)
            .await
            .unwrap();
        assert_eq!(by_year.len(), 3);

        let by_month = list_readings(&pool, Some(2022), Some(12), None, 0, 100)
            .await
            .unwrap();
        assert_eq!(by_month.len(), 2);

        let by_day = list_readings(&pool, Some(2022), Some(12), Some(2), 0, 100)
            .await
            .unwrap();
        assert_eq!(by_day.len(), 1);
        assert_eq!(by_day[0].amount, Some(200.0));

        let unfiltered = list_readings(&pool, None, None, None, 0, 100).await.unwrap();
        assert_eq!(unfiltered.len(), 4);
    }

    #[tokio::test]
    async fn month_scoped_readings_include_all_days_of_the_month() {
        let pool = memory_pool().await;
        let meter = seed_meter(&pool).await;

        seed_reading(&pool, meter, date!(2022 - 12 - 01), 1.0).await;
        seed_reading(&pool, meter, date!(2022 - 12 - 31), 2.0).await;
        seed_reading(&pool, meter, date!(2023 - 01 - 01), 3.0).await;

        let december = readings_for_month(&pool, meter, 2022, 12).await.unwrap();
        assert_eq!(december.len(), 2);
        assert_eq!(december[0].date, date!(2022 - 12 - 01));
        assert_eq!(december[1].date, date!(2022 - 12 - 31));
    }

    #[tokio::test]
    async fn duplicate_same_day_readings_are_both_kept() {
        let pool = memory_pool().await;
        let meter = seed_meter(&pool).await;

        seed_reading(&pool, meter, date!(2022 - 12 - 01), 10.0).await;
        seed_reading(&pool, meter, date!(2022 - 12 - 01), 10.0).await;

        let rows = readings_of_meter(&pool, meter).await.unwrap();
        assert_eq!(rows.len(), 2);
    }
}
