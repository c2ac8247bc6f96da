// Placeholders are ClickHouse server-side parameters, bound by name:
// {url:String} is the url prefix, {interval:Int64} the lookback in hours.

pub const SELECT_FAILURES: &str = r#"
                SELECT
                    toString(toStartOfInterval(timestamp, INTERVAL 1 HOUR)) AS bucket,
                    toFloat64(count()) AS value
                FROM checks
                WHERE startsWith(url, {url:String})
                  AND timestamp >= now() - toIntervalHour({interval:Int64})
                  AND timestamp <= now()
                  AND success = false
                GROUP BY bucket
                ORDER BY bucket ASC
                "#;

pub const SELECT_RESPONSE_TIME: &str = r#"
                SELECT
                    toString(toStartOfInterval(timestamp, INTERVAL 1 HOUR)) AS bucket,
                    round(avg(response_time), 3) AS value
                FROM checks
                WHERE startsWith(url, {url:String})
                  AND timestamp >= now() - toIntervalHour({interval:Int64})
                  AND timestamp <= now()
                GROUP BY bucket
                ORDER BY bucket ASC
                "#;

pub const SELECT_FAILURES_BY_TYPES: &str = r#"
                SELECT
                    countIf(response_time > 3) AS critical,
                    countIf(response_time >= 1 AND response_time <= 3) AS warning,
                    countIf(response_time > 1) AS resolved
                FROM checks
                WHERE startsWith(url, {url:String})
                  AND timestamp >= now() - toIntervalHour({interval:Int64})
                  AND timestamp <= now()
                  AND success = false
                "#;

pub const SELECT_HEATMAP: &str = r#"
                SELECT
                    toString(grid.d) AS day_of_week,
                    toInt64(grid.h) AS hour_of_day,
                    toInt64(ifNull(failures.cnt, 0)) AS value
                FROM (
                    SELECT d, h
                    FROM (SELECT arrayJoin(range(1, 8)) AS d) AS days
                    CROSS JOIN (SELECT arrayJoin(range(0, 24)) AS h) AS hours
                ) AS grid
                LEFT JOIN (
                    SELECT
                        toDayOfWeek(timestamp) AS fd,
                        toHour(timestamp) AS fh,
                        count() AS cnt
                    FROM checks
                    WHERE startsWith(url, {url:String})
                      AND timestamp >= now() - toIntervalHour({interval:Int64})
                      AND timestamp <= now()
                      AND success = false
                    GROUP BY fd, fh
                ) AS failures ON grid.d = failures.fd AND grid.h = failures.fh
                ORDER BY grid.d ASC, grid.h ASC
                "#;
