// ?1 is the url prefix, ?2 the lookback in hours. Timestamps are stored as
// "YYYY-MM-DD HH:MM:SS" in UTC.

#[cfg(test)]
pub const CREATE_CHECK: &str =
    "INSERT INTO checks (url, timestamp, success, response_time) VALUES (?1, ?2, ?3, ?4)";

pub const SELECT_FAILURES: &str = r#"
                SELECT strftime('%Y-%m-%d %H:00:00', timestamp) AS bucket,
                CAST(COUNT(*) AS REAL) AS value
                FROM checks
                WHERE substr(url, 1, length(?1)) = ?1
                  AND datetime(timestamp) >= datetime('now', printf('%+d hours', -?2))
                  AND datetime(timestamp) <= datetime('now')
                  AND success = 0
                GROUP BY bucket
                ORDER BY bucket ASC
                "#;

pub const SELECT_RESPONSE_TIME: &str = r#"
                SELECT strftime('%Y-%m-%d %H:00:00', timestamp) AS bucket,
                ROUND(AVG(response_time), 3) AS value
                FROM checks
                WHERE substr(url, 1, length(?1)) = ?1
                  AND datetime(timestamp) >= datetime('now', printf('%+d hours', -?2))
                  AND datetime(timestamp) <= datetime('now')
                GROUP BY bucket
                ORDER BY bucket ASC
                "#;

pub const SELECT_FAILURES_BY_TYPES: &str = r#"
                SELECT
                COALESCE(SUM(response_time > 3), 0) AS critical,
                COALESCE(SUM(response_time >= 1 AND response_time <= 3), 0) AS warning,
                COALESCE(SUM(response_time > 1), 0) AS resolved
                FROM checks
                WHERE substr(url, 1, length(?1)) = ?1
                  AND datetime(timestamp) >= datetime('now', printf('%+d hours', -?2))
                  AND datetime(timestamp) <= datetime('now')
                  AND success = 0
                "#;

// strftime('%w') counts from Sunday = 0; the grid uses Monday = 1 .. Sunday = 7.
pub const SELECT_HEATMAP: &str = r#"
                WITH RECURSIVE
                days(d) AS (SELECT 1 UNION ALL SELECT d + 1 FROM days WHERE d < 7),
                hours(h) AS (SELECT 0 UNION ALL SELECT h + 1 FROM hours WHERE h < 23),
                failures AS (
                    SELECT ((CAST(strftime('%w', timestamp) AS INTEGER) + 6) % 7) + 1 AS fd,
                    CAST(strftime('%H', timestamp) AS INTEGER) AS fh,
                    COUNT(*) AS cnt
                    FROM checks
                    WHERE substr(url, 1, length(?1)) = ?1
                      AND datetime(timestamp) >= datetime('now', printf('%+d hours', -?2))
                      AND datetime(timestamp) <= datetime('now')
                      AND success = 0
                    GROUP BY fd, fh
                )
                SELECT CAST(days.d AS TEXT) AS day_of_week,
                hours.h AS hour_of_day,
                COALESCE(failures.cnt, 0) AS value
                FROM days
                CROSS JOIN hours
                LEFT JOIN failures ON failures.fd = days.d AND failures.fh = hours.h
                ORDER BY days.d ASC, hours.h ASC
                "#;
