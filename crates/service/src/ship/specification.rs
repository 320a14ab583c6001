//! Ship filtering and ordering.
//!
//! A [`ShipFilter`] holds the optional listing constraints; every present
//! constraint is ANDed. It renders either to a sea-orm [`Condition`] for SQL
//! backends or to an in-process predicate via [`ShipFilter::matches`]. Both
//! renderings must agree: substring filters are case-sensitive and treat
//! their input literally.

use std::{cmp::Ordering, str::FromStr};

use models::ship::{self, ShipType};
use sea_orm::{sea_query::LikeExpr, ColumnTrait, Condition, QueryOrder, Select};

use crate::errors::ServiceError;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShipFilter {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<ShipType>,
    /// Inclusive lower bound on `prod_date`, epoch millis.
    pub after: Option<i64>,
    /// Inclusive upper bound on `prod_date`, epoch millis.
    pub before: Option<i64>,
    pub is_used: Option<bool>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_crew_size: Option<i32>,
    pub max_crew_size: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
}

const LIKE_ESCAPE: char = '\\';

fn contains_pattern(needle: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape(LIKE_ESCAPE)
}

fn within<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> bool {
    min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
}

impl ShipFilter {
    pub fn is_empty(&self) -> bool {
        *self == ShipFilter::default()
    }

    /// SQL rendering: all present constraints under one `AND`.
    pub fn to_condition(&self) -> Condition {
        use ship::Column;

        let mut cond = Condition::all();
        if let Some(name) = &self.name {
            cond = cond.add(Column::Name.like(contains_pattern(name)));
        }
        if let Some(planet) = &self.planet {
            cond = cond.add(Column::Planet.like(contains_pattern(planet)));
        }
        if let Some(ship_type) = self.ship_type {
            cond = cond.add(Column::ShipType.eq(ship_type));
        }
        if let Some(after) = self.after {
            cond = cond.add(Column::ProdDate.gte(after));
        }
        if let Some(before) = self.before {
            cond = cond.add(Column::ProdDate.lte(before));
        }
        if let Some(is_used) = self.is_used {
            cond = cond.add(Column::IsUsed.eq(is_used));
        }
        if let Some(v) = self.min_speed {
            cond = cond.add(Column::Speed.gte(v));
        }
        if let Some(v) = self.max_speed {
            cond = cond.add(Column::Speed.lte(v));
        }
        if let Some(v) = self.min_crew_size {
            cond = cond.add(Column::CrewSize.gte(v));
        }
        if let Some(v) = self.max_crew_size {
            cond = cond.add(Column::CrewSize.lte(v));
        }
        if let Some(v) = self.min_rating {
            cond = cond.add(Column::Rating.gte(v));
        }
        if let Some(v) = self.max_rating {
            cond = cond.add(Column::Rating.lte(v));
        }
        cond
    }

    /// In-process rendering used by non-SQL repositories.
    pub fn matches(&self, s: &ship::Model) -> bool {
        self.name.as_deref().map_or(true, |n| s.name.contains(n))
            && self.planet.as_deref().map_or(true, |p| s.planet.contains(p))
            && self.ship_type.map_or(true, |t| s.ship_type == t)
            && within(s.prod_date, self.after, self.before)
            && self.is_used.map_or(true, |u| s.is_used == u)
            && within(s.speed, self.min_speed, self.max_speed)
            && within(s.crew_size, self.min_crew_size, self.max_crew_size)
            && within(s.rating, self.min_rating, self.max_rating)
    }
}

/// Sortable ship fields. Sorting is ascending with ties broken by id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShipOrder {
    #[default]
    Id,
    Speed,
    CrewSize,
    Date,
    Rating,
}

impl ShipOrder {
    pub fn column(self) -> ship::Column {
        match self {
            ShipOrder::Id => ship::Column::Id,
            ShipOrder::Speed => ship::Column::Speed,
            ShipOrder::CrewSize => ship::Column::CrewSize,
            ShipOrder::Date => ship::Column::ProdDate,
            ShipOrder::Rating => ship::Column::Rating,
        }
    }

    pub fn apply(self, select: Select<ship::Entity>) -> Select<ship::Entity> {
        match self {
            ShipOrder::Id => select.order_by_asc(ship::Column::Id),
            other => select.order_by_asc(other.column()).order_by_asc(ship::Column::Id),
        }
    }

    pub fn compare(self, a: &ship::Model, b: &ship::Model) -> Ordering {
        let primary = match self {
            ShipOrder::Id => Ordering::Equal,
            ShipOrder::Speed => a.speed.total_cmp(&b.speed),
            ShipOrder::CrewSize => a.crew_size.cmp(&b.crew_size),
            ShipOrder::Date => a.prod_date.cmp(&b.prod_date),
            ShipOrder::Rating => a.rating.total_cmp(&b.rating),
        };
        primary.then(a.id.cmp(&b.id))
    }
}

impl FromStr for ShipOrder {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ID" => Ok(ShipOrder::Id),
            "SPEED" => Ok(ShipOrder::Speed),
            "CREW_SIZE" => Ok(ShipOrder::CrewSize),
            "DATE" | "PRODUCTION_DATE" => Ok(ShipOrder::Date),
            "RATING" => Ok(ShipOrder::Rating),
            other => Err(ServiceError::Validation(format!("unknown order `{other}`"))),
        }
    }
}
