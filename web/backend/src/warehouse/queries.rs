//! SQL builders for the market profiling report.
//!
//! Every query keys off the same CTE: catalog recordings whose lifetime
//! streams in the territory landed in the 5M-50M band, the range where
//! playlist placement still moves the needle.

/// Database/schema pair the warehouse tables live under.
#[derive(Debug, Clone)]
pub struct WarehouseSchema {
    pub database: String,
    pub schema: String,
}

impl Default for WarehouseSchema {
    fn default() -> Self {
        Self {
            database: "MUSIC_INSIGHTS".to_string(),
            schema: "PUBLIC".to_string(),
        }
    }
}

impl WarehouseSchema {
    fn table(&self, name: &str) -> String {
        format!("{}.{}.{}", self.database, self.schema, name)
    }

    fn streams(&self) -> String {
        self.table("LUMINATEMONTHLYSTREAMSBYRECORDING")
    }

    fn high_value(&self) -> String {
        self.table("SPOTHIGHVALUE_ISRCS")
    }

    fn playlist_data(&self) -> String {
        self.table("SPOTIFY_PLAYLIST_DATA")
    }

    fn hit_songs_cte(&self, territory: &str) -> String {
        format!(
            r#"hit_songs_5_50m AS (
        SELECT DISTINCT ISRC
        FROM {streams}
        WHERE Territory = '{territory}'
        GROUP BY ISRC
        HAVING MAX("Streams ATD") BETWEEN 5000000 AND 50000000
    )"#,
            streams = self.streams(),
        )
    }

    /// Market-wide totals: hit count, playlist coverage, stream averages.
    pub fn summary_stats(&self, territory: &str) -> String {
        format!(
            r#"WITH hit_songs_5_50m AS (
        SELECT
            ISRC,
            MAX("Streams ATD") as total_streams
        FROM {streams}
        WHERE Territory = '{territory}'
        GROUP BY ISRC
        HAVING MAX("Streams ATD") BETWEEN 5000000 AND 50000000
    ),
    playlist_counts AS (
        SELECT
            p.isrc,
            COUNT(DISTINCT p.playlist_id) as playlist_count
        FROM {playlist_data} p
        INNER JOIN hit_songs_5_50m hs ON p.isrc = hs.ISRC
        GROUP BY p.isrc
    )
    SELECT
        COUNT(DISTINCT hs.ISRC) as total_5_50m_songs,
        COUNT(DISTINCT p.playlist_id) as total_playlists,
        ROUND(AVG(pc.playlist_count), 1) as avg_playlists_per_song,
        ROUND(AVG(hs.total_streams) / 1000000, 1) as avg_streams_millions,
        ROUND(PERCENTILE_CONT(0.5) WITHIN GROUP (ORDER BY hs.total_streams) / 1000000, 1) as median_streams_millions
    FROM hit_songs_5_50m hs
    LEFT JOIN {playlist_data} p ON hs.ISRC = p.isrc
    LEFT JOIN playlist_counts pc ON hs.ISRC = pc.isrc;"#,
            streams = self.streams(),
            playlist_data = self.playlist_data(),
        )
    }

    /// Hit rate per playlist joined with how recently and how often the
    /// playlist adds songs, with a priority label for each.
    pub fn playlist_performance(&self, territory: &str) -> String {
        format!(
            r#"WITH {hit_cte},
    playlist_performance AS (
        SELECT
            high_value.playlist_name,
            high_value.playlist_id,
            COUNT(DISTINCT high_value.isrc) as total_songs,
            COUNT(DISTINCT CASE WHEN hs.ISRC IS NOT NULL THEN high_value.isrc END) as songs_hit_5_50m,
            ROUND(
                COUNT(DISTINCT CASE WHEN hs.ISRC IS NOT NULL THEN high_value.isrc END) * 1.0 /
                NULLIF(COUNT(DISTINCT high_value.isrc), 0), 3
            ) as hit_rate_5_50m_percent,
            AVG(p.playlist_popularity) as avg_playlist_popularity,
            AVG(l."Streams ATD") as avg_song_streams
        FROM {high_value} high_value
        LEFT JOIN {playlist_data} p
            ON high_value.isrc = p.isrc AND high_value.playlist_id = p.playlist_id
        LEFT JOIN (
            SELECT ISRC, MAX("Streams ATD") as "Streams ATD"
            FROM {streams}
            WHERE Territory = '{territory}'
            GROUP BY ISRC
        ) l ON high_value.isrc = l.ISRC
        LEFT JOIN hit_songs_5_50m hs ON high_value.isrc = hs.ISRC
        WHERE TRY_TO_DATE(p.added_at) <= CURRENT_DATE()
        AND l."Streams ATD" IS NOT NULL
        GROUP BY high_value.playlist_name, high_value.playlist_id
        HAVING COUNT(DISTINCT high_value.isrc) >= 10
    ),
    playlist_activity AS (
        SELECT
            playlist_name,
            MAX(TRY_TO_DATE(added_at)) as last_song_added,
            DATEDIFF('day', MAX(TRY_TO_DATE(added_at)), CURRENT_DATE()) as days_since_last_update,
            COUNT(DISTINCT isrc) as total_songs_ever_added,
            DATEDIFF('month', MIN(TRY_TO_DATE(added_at)), MAX(TRY_TO_DATE(added_at))) as months_active
        FROM {playlist_data}
        WHERE TRY_TO_DATE(added_at) IS NOT NULL
        GROUP BY playlist_name
    )
    SELECT
        pp.playlist_name,
        pp.total_songs,
        pp.songs_hit_5_50m,
        pp.hit_rate_5_50m_percent,
        CONCAT(ROUND(pp.avg_playlist_popularity/1000000, 1), 'M') as followers,
        ROUND(pp.avg_song_streams/1000000, 1) as avg_song_streams_millions,
        pa.last_song_added,
        pa.days_since_last_update,
        CASE
            WHEN pa.months_active = 0 THEN pa.total_songs_ever_added
            ELSE ROUND(pa.total_songs_ever_added * 1.0 / GREATEST(pa.months_active, 1), 1)
        END as avg_songs_per_month,
        CASE
            WHEN pa.days_since_last_update <= 7 THEN 'Very Active'
            WHEN pa.days_since_last_update <= 30 THEN 'Active'
            WHEN pa.days_since_last_update <= 90 THEN 'Moderate'
            WHEN pa.days_since_last_update <= 180 THEN 'Low Activity'
            ELSE 'Inactive'
        END as activity_status,
        CASE
            WHEN pa.days_since_last_update <= 30 AND pp.hit_rate_5_50m_percent >= 0.20 THEN 'High Priority'
            WHEN pa.days_since_last_update <= 90 AND pp.hit_rate_5_50m_percent >= 0.15 THEN 'Medium Priority'
            WHEN pa.days_since_last_update <= 180 AND pp.hit_rate_5_50m_percent >= 0.10 THEN 'Low Priority'
            ELSE 'Deprioritize'
        END as model_priority
    FROM playlist_performance pp
    LEFT JOIN playlist_activity pa ON pp.playlist_name = pa.playlist_name
    WHERE pa.last_song_added IS NOT NULL
    ORDER BY
        CASE
            WHEN pa.days_since_last_update <= 30 AND pp.hit_rate_5_50m_percent >= 0.20 THEN 1
            WHEN pa.days_since_last_update <= 90 AND pp.hit_rate_5_50m_percent >= 0.15 THEN 2
            WHEN pa.days_since_last_update <= 180 AND pp.hit_rate_5_50m_percent >= 0.10 THEN 3
            ELSE 4
        END,
        pp.hit_rate_5_50m_percent DESC
    LIMIT 50;"#,
            hit_cte = self.hit_songs_cte(territory),
            high_value = self.high_value(),
            playlist_data = self.playlist_data(),
            streams = self.streams(),
        )
    }

    /// Which playlists the band's hits appeared on most often.
    pub fn most_common_playlists(&self, territory: &str) -> String {
        format!(
            r#"WITH {hit_cte},
    playlist_hits AS (
        SELECT
            h.playlist_name,
            COUNT(DISTINCT h.isrc) as hit_songs_count,
            ROUND(
                COUNT(DISTINCT h.isrc) * 1.0 / (SELECT COUNT(*) FROM hit_songs_5_50m), 3
            ) as percentage_of_5_50m_hits
        FROM {high_value} h
        INNER JOIN hit_songs_5_50m hs ON h.isrc = hs.ISRC
        GROUP BY h.playlist_name
    ),
    playlist_activity AS (
        SELECT
            playlist_name,
            MAX(TRY_TO_DATE(added_at)) as last_song_added,
            DATEDIFF('day', MAX(TRY_TO_DATE(added_at)), CURRENT_DATE()) as days_since_last_update,
            AVG(playlist_popularity) as avg_playlist_popularity
        FROM {playlist_data}
        WHERE TRY_TO_DATE(added_at) IS NOT NULL
        GROUP BY playlist_name
    )
    SELECT
        ph.playlist_name,
        ph.hit_songs_count,
        ph.percentage_of_5_50m_hits,
        CONCAT(ROUND(pa.avg_playlist_popularity/1000000, 1), 'M') as followers,
        pa.last_song_added,
        pa.days_since_last_update,
        CASE
            WHEN pa.days_since_last_update <= 7 THEN 'Very Active'
            WHEN pa.days_since_last_update <= 30 THEN 'Active'
            WHEN pa.days_since_last_update <= 90 THEN 'Moderate'
            WHEN pa.days_since_last_update <= 180 THEN 'Low Activity'
            ELSE 'Inactive'
        END as activity_status
    FROM playlist_hits ph
    LEFT JOIN playlist_activity pa ON ph.playlist_name = pa.playlist_name
    WHERE pa.last_song_added IS NOT NULL
    ORDER BY ph.hit_songs_count DESC
    LIMIT 30;"#,
            hit_cte = self.hit_songs_cte(territory),
            high_value = self.high_value(),
            playlist_data = self.playlist_data(),
        )
    }

    /// Buckets hits by how many months of streaming it took to clear 5M
    /// after the first playlist add.
    pub fn timing_analysis(&self, territory: &str) -> String {
        format!(
            r#"WITH {hit_cte},
    playlist_songs AS (
        SELECT DISTINCT
            high_value.isrc,
            p.name as song_name,
            p.artist,
            MIN(TRY_TO_DATE(p.added_at)) as first_playlist_date
        FROM {high_value} high_value
        LEFT JOIN {playlist_data} p
            ON high_value.isrc = p.isrc AND high_value.playlist_id = p.playlist_id
        WHERE TRY_TO_DATE(p.added_at) <= CURRENT_DATE()
        GROUP BY high_value.isrc, p.name, p.artist
    ),
    monthly_progression AS (
        SELECT
            ps.isrc,
            l."Streams ATD" as cumulative_streams,
            ROW_NUMBER() OVER (
                PARTITION BY ps.isrc
                ORDER BY l."Activity Year", l."Activity Month"
            ) as month_number
        FROM playlist_songs ps
        JOIN {streams} l
            ON ps.isrc = l.ISRC
        WHERE l.Territory = '{territory}'
    ),
    hit_timing AS (
        SELECT
            isrc,
            MIN(CASE WHEN cumulative_streams >= 5000000 THEN month_number END) as months_to_5m,
            MAX(cumulative_streams) as final_total_streams
        FROM monthly_progression
        GROUP BY isrc
        HAVING MAX(cumulative_streams) BETWEEN 5000000 AND 50000000
    )
    SELECT
        CASE
            WHEN months_to_5m <= 3 THEN '1-3 months to 5M'
            WHEN months_to_5m <= 6 THEN '4-6 months to 5M'
            WHEN months_to_5m <= 12 THEN '7-12 months to 5M'
            ELSE 'Over 1 year to 5M'
        END as time_to_5m,
        COUNT(*) as song_count,
        ROUND(COUNT(*) * 1.0 / SUM(COUNT(*)) OVER (), 3) as percentage,
        ROUND(AVG(final_total_streams/1000000), 1) as avg_final_streams_millions
    FROM hit_timing
    WHERE months_to_5m IS NOT NULL
    GROUP BY
        CASE
            WHEN months_to_5m <= 3 THEN '1-3 months to 5M'
            WHEN months_to_5m <= 6 THEN '4-6 months to 5M'
            WHEN months_to_5m <= 12 THEN '7-12 months to 5M'
            ELSE 'Over 1 year to 5M'
        END
    ORDER BY
        CASE time_to_5m
            WHEN '1-3 months to 5M' THEN 1
            WHEN '4-6 months to 5M' THEN 2
            WHEN '7-12 months to 5M' THEN 3
            ELSE 4
        END;"#,
            hit_cte = self.hit_songs_cte(territory),
            high_value = self.high_value(),
            playlist_data = self.playlist_data(),
            streams = self.streams(),
        )
    }

    /// Hit rate of playlist adds grouped by calendar month.
    pub fn seasonality(&self, territory: &str) -> String {
        format!(
            r#"WITH {hit_cte}
    SELECT
        EXTRACT(MONTH FROM TRY_TO_DATE(p.added_at)) as playlist_month,
        MONTHNAME(TRY_TO_DATE(p.added_at)) as month_name,
        COUNT(*) as songs_added,
        ROUND(
            AVG(CASE WHEN hs.ISRC IS NOT NULL THEN 1 ELSE 0 END), 3
        ) as hit_rate_5_50m_percent
    FROM {playlist_data} p
    INNER JOIN {high_value} h
        ON p.isrc = h.isrc
    LEFT JOIN hit_songs_5_50m hs ON p.isrc = hs.ISRC
    WHERE TRY_TO_DATE(p.added_at) <= CURRENT_DATE()
    AND TRY_TO_DATE(p.added_at) IS NOT NULL
    GROUP BY
        EXTRACT(MONTH FROM TRY_TO_DATE(p.added_at)),
        MONTHNAME(TRY_TO_DATE(p.added_at))
    ORDER BY playlist_month;"#,
            hit_cte = self.hit_songs_cte(territory),
            playlist_data = self.playlist_data(),
            high_value = self.high_value(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_query_filters_by_territory() {
        let schema = WarehouseSchema::default();
        for sql in [
            schema.summary_stats("FR"),
            schema.playlist_performance("FR"),
            schema.most_common_playlists("FR"),
            schema.timing_analysis("FR"),
            schema.seasonality("FR"),
        ] {
            assert!(sql.contains("Territory = 'FR'"), "missing territory filter:\n{sql}");
            assert!(sql.contains("BETWEEN 5000000 AND 50000000"));
        }
    }

    #[test]
    fn tables_are_fully_qualified() {
        let schema = WarehouseSchema {
            database: "ANALYTICS".to_string(),
            schema: "STAGING".to_string(),
        };
        let sql = schema.summary_stats("DE");
        assert!(sql.contains("ANALYTICS.STAGING.LUMINATEMONTHLYSTREAMSBYRECORDING"));
        assert!(sql.contains("ANALYTICS.STAGING.SPOTIFY_PLAYLIST_DATA"));
    }

    #[test]
    fn performance_query_keeps_activity_thresholds() {
        let sql = WarehouseSchema::default().playlist_performance("GB");
        assert!(sql.contains("'Very Active'"));
        assert!(sql.contains("'High Priority'"));
        assert!(sql.contains("LIMIT 50"));
    }
}
