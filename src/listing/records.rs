//! Searchable fields and sortable columns for each record type.

use std::str::FromStr;

use super::{any_field_contains, ColumnInfo, Listable, SortValue, UnknownColumn};
use crate::api::dto::{Customer, Employee, Leave, Notification, ServiceOffering, Vehicle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleColumn {
    Id,
    Make,
    Model,
    Year,
    LicensePlate,
    Owner,
    CreatedAt,
}

impl ColumnInfo for VehicleColumn {
    const ALL: &'static [(Self, &'static str, &'static str)] = &[
        (VehicleColumn::Id, "id", "ID"),
        (VehicleColumn::Make, "make", "Make"),
        (VehicleColumn::Model, "model", "Model"),
        (VehicleColumn::Year, "year", "Year"),
        (VehicleColumn::LicensePlate, "license_plate", "Plate"),
        (VehicleColumn::Owner, "owner", "Owner"),
        (VehicleColumn::CreatedAt, "created_at", "Registered"),
    ];
}

impl Listable for Vehicle {
    type Column = VehicleColumn;

    fn matches(&self, needle: &str) -> bool {
        any_field_contains(
            needle,
            [
                Some(self.make.as_str()),
                Some(self.model.as_str()),
                Some(self.license_plate.as_str()),
                self.vin.as_deref(),
                self.color.as_deref(),
                self.customer_name.as_deref(),
            ],
        ) || self.year.to_string().contains(needle)
    }

    fn sort_value(&self, column: VehicleColumn) -> SortValue {
        match column {
            VehicleColumn::Id => SortValue::Number(self.id as f64),
            VehicleColumn::Make => SortValue::text(&self.make),
            VehicleColumn::Model => SortValue::text(&self.model),
            VehicleColumn::Year => SortValue::Number(self.year as f64),
            VehicleColumn::LicensePlate => SortValue::text(&self.license_plate),
            VehicleColumn::Owner => SortValue::opt_text(self.customer_name.as_deref()),
            VehicleColumn::CreatedAt => SortValue::opt_datetime(self.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerColumn {
    Id,
    Username,
    Name,
    Email,
    Phone,
    CreatedAt,
}

impl ColumnInfo for CustomerColumn {
    const ALL: &'static [(Self, &'static str, &'static str)] = &[
        (CustomerColumn::Id, "id", "ID"),
        (CustomerColumn::Username, "username", "Username"),
        (CustomerColumn::Name, "name", "Name"),
        (CustomerColumn::Email, "email", "Email"),
        (CustomerColumn::Phone, "phone", "Phone"),
        (CustomerColumn::CreatedAt, "created_at", "Joined"),
    ];
}

/// "First Last", or whichever half is present
pub fn full_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    match (first, last) {
        (Some(f), Some(l)) => Some(format!("{} {}", f, l)),
        (Some(n), None) | (None, Some(n)) => Some(n.to_string()),
        (None, None) => None,
    }
}

impl Customer {
    pub fn full_name(&self) -> Option<String> {
        full_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

impl Listable for Customer {
    type Column = CustomerColumn;

    fn matches(&self, needle: &str) -> bool {
        any_field_contains(
            needle,
            [
                Some(self.username.as_str()),
                Some(self.email.as_str()),
                self.first_name.as_deref(),
                self.last_name.as_deref(),
                self.phone_number.as_deref(),
            ],
        )
    }

    fn sort_value(&self, column: CustomerColumn) -> SortValue {
        match column {
            CustomerColumn::Id => SortValue::Number(self.id as f64),
            CustomerColumn::Username => SortValue::text(&self.username),
            CustomerColumn::Name => SortValue::opt_text(self.full_name().as_deref()),
            CustomerColumn::Email => SortValue::text(&self.email),
            CustomerColumn::Phone => SortValue::opt_text(self.phone_number.as_deref()),
            CustomerColumn::CreatedAt => SortValue::opt_datetime(self.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeColumn {
    Id,
    Username,
    Name,
    Email,
    Specialization,
    CreatedAt,
}

impl ColumnInfo for EmployeeColumn {
    const ALL: &'static [(Self, &'static str, &'static str)] = &[
        (EmployeeColumn::Id, "id", "ID"),
        (EmployeeColumn::Username, "username", "Username"),
        (EmployeeColumn::Name, "name", "Name"),
        (EmployeeColumn::Email, "email", "Email"),
        (EmployeeColumn::Specialization, "specialization", "Specialization"),
        (EmployeeColumn::CreatedAt, "created_at", "Hired"),
    ];
}

impl Employee {
    pub fn full_name(&self) -> Option<String> {
        full_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

impl Listable for Employee {
    type Column = EmployeeColumn;

    fn matches(&self, needle: &str) -> bool {
        any_field_contains(
            needle,
            [
                Some(self.username.as_str()),
                Some(self.email.as_str()),
                self.first_name.as_deref(),
                self.last_name.as_deref(),
                self.specialization.as_deref(),
            ],
        )
    }

    fn sort_value(&self, column: EmployeeColumn) -> SortValue {
        match column {
            EmployeeColumn::Id => SortValue::Number(self.id as f64),
            EmployeeColumn::Username => SortValue::text(&self.username),
            EmployeeColumn::Name => SortValue::opt_text(self.full_name().as_deref()),
            EmployeeColumn::Email => SortValue::text(&self.email),
            EmployeeColumn::Specialization => SortValue::opt_text(self.specialization.as_deref()),
            EmployeeColumn::CreatedAt => SortValue::opt_datetime(self.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveColumn {
    Id,
    Employee,
    LeaveType,
    StartDate,
    EndDate,
    Status,
    CreatedAt,
}

impl ColumnInfo for LeaveColumn {
    const ALL: &'static [(Self, &'static str, &'static str)] = &[
        (LeaveColumn::Id, "id", "ID"),
        (LeaveColumn::Employee, "employee", "Employee"),
        (LeaveColumn::LeaveType, "leave_type", "Type"),
        (LeaveColumn::StartDate, "start_date", "From"),
        (LeaveColumn::EndDate, "end_date", "To"),
        (LeaveColumn::Status, "status", "Status"),
        (LeaveColumn::CreatedAt, "created_at", "Requested"),
    ];
}

impl Listable for Leave {
    type Column = LeaveColumn;

    fn matches(&self, needle: &str) -> bool {
        any_field_contains(
            needle,
            [
                self.employee_name.as_deref(),
                Some(self.leave_type.as_str()),
                Some(self.status.as_str()),
                self.reason.as_deref(),
            ],
        )
    }

    fn sort_value(&self, column: LeaveColumn) -> SortValue {
        match column {
            LeaveColumn::Id => SortValue::Number(self.id as f64),
            LeaveColumn::Employee => SortValue::opt_text(self.employee_name.as_deref()),
            LeaveColumn::LeaveType => SortValue::text(&self.leave_type),
            LeaveColumn::StartDate => SortValue::date(self.start_date),
            LeaveColumn::EndDate => SortValue::date(self.end_date),
            LeaveColumn::Status => SortValue::text(self.status.as_str()),
            LeaveColumn::CreatedAt => SortValue::opt_datetime(self.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceColumn {
    Id,
    Name,
    Price,
    Duration,
}

impl ColumnInfo for ServiceColumn {
    const ALL: &'static [(Self, &'static str, &'static str)] = &[
        (ServiceColumn::Id, "id", "ID"),
        (ServiceColumn::Name, "name", "Service"),
        (ServiceColumn::Price, "price", "Price"),
        (ServiceColumn::Duration, "duration", "Duration"),
    ];
}

impl Listable for ServiceOffering {
    type Column = ServiceColumn;

    fn matches(&self, needle: &str) -> bool {
        any_field_contains(needle, [Some(self.name.as_str()), self.description.as_deref()])
    }

    fn sort_value(&self, column: ServiceColumn) -> SortValue {
        match column {
            ServiceColumn::Id => SortValue::Number(self.id as f64),
            ServiceColumn::Name => SortValue::text(&self.name),
            ServiceColumn::Price => SortValue::Number(self.price),
            ServiceColumn::Duration => self
                .duration_minutes
                .map(|m| SortValue::Number(m as f64))
                .unwrap_or(SortValue::Missing),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationColumn {
    Id,
    Title,
    Type,
    CreatedAt,
}

impl ColumnInfo for NotificationColumn {
    const ALL: &'static [(Self, &'static str, &'static str)] = &[
        (NotificationColumn::Id, "id", "ID"),
        (NotificationColumn::Title, "title", "Title"),
        (NotificationColumn::Type, "type", "Type"),
        (NotificationColumn::CreatedAt, "created_at", "Created"),
    ];
}

impl Listable for Notification {
    type Column = NotificationColumn;

    fn matches(&self, needle: &str) -> bool {
        any_field_contains(
            needle,
            [
                Some(self.title.as_str()),
                Some(self.message.as_str()),
                Some(self.kind.as_str()),
            ],
        )
    }

    fn sort_value(&self, column: NotificationColumn) -> SortValue {
        match column {
            NotificationColumn::Id => SortValue::Number(self.id as f64),
            NotificationColumn::Title => SortValue::text(&self.title),
            NotificationColumn::Type => SortValue::text(self.kind.as_str()),
            NotificationColumn::CreatedAt => SortValue::Date(self.created_at),
        }
    }
}

macro_rules! impl_from_str {
    ($($column:ty),*) => {
        $(
            impl FromStr for $column {
                type Err = UnknownColumn;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$column as ColumnInfo>::parse(s)
                }
            }
        )*
    };
}

impl_from_str!(
    VehicleColumn,
    CustomerColumn,
    EmployeeColumn,
    LeaveColumn,
    ServiceColumn,
    NotificationColumn
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::LeaveStatus;
    use crate::listing::{ListView, SortDirection, SortState};
    use chrono::NaiveDate;

    fn leave(id: i64, who: &str, start: (i32, u32, u32), status: LeaveStatus) -> Leave {
        let start = NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap();
        Leave {
            id,
            employee_id: Some(id * 10),
            employee_name: Some(who.to_string()),
            leave_type: "ANNUAL".to_string(),
            start_date: start,
            end_date: start,
            reason: None,
            status,
            created_at: None,
        }
    }

    fn vehicle(id: i64, make: &str, plate: &str) -> Vehicle {
        Vehicle {
            id,
            make: make.to_string(),
            model: "Model".to_string(),
            year: 2019,
            license_plate: plate.to_string(),
            vin: None,
            color: Some("Red".to_string()),
            customer_id: None,
            customer_name: None,
            created_at: None,
        }
    }

    #[test]
    fn test_column_parsing() {
        assert_eq!("license-plate".parse::<VehicleColumn>(), Ok(VehicleColumn::LicensePlate));
        assert_eq!("licensePlate".parse::<VehicleColumn>(), Ok(VehicleColumn::LicensePlate));
        assert_eq!("START_DATE".parse::<LeaveColumn>(), Ok(LeaveColumn::StartDate));
        assert!("colour".parse::<VehicleColumn>().is_err());
        assert_eq!(LeaveColumn::StartDate.label(), "From");
        assert_eq!(LeaveColumn::StartDate.key(), "start_date");
    }

    #[test]
    fn test_leaves_sort_chronologically() {
        let leaves = vec![
            leave(1, "Ann", (2024, 5, 20), LeaveStatus::Pending),
            leave(2, "Bo", (2023, 11, 2), LeaveStatus::Approved),
            leave(3, "Cy", (2024, 1, 9), LeaveStatus::Rejected),
        ];

        let mut view = ListView::new(leaves);
        view.set_sort(SortState::by(LeaveColumn::StartDate, SortDirection::Descending));
        let ids: Vec<i64> = view.filtered().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn test_leave_filter_matches_status() {
        let mut view = ListView::new(vec![
            leave(1, "Ann", (2024, 5, 20), LeaveStatus::Pending),
            leave(2, "Bo", (2023, 11, 2), LeaveStatus::Approved),
        ]);
        view.set_query("pending");
        assert_eq!(view.filtered_count(), 1);
    }

    #[test]
    fn test_vehicle_filter_fields() {
        let mut view = ListView::new(vec![
            vehicle(1, "Toyota", "ABC-123"),
            vehicle(2, "Honda", "XYZ-987"),
        ]);

        view.set_query("abc");
        assert_eq!(view.filtered()[0].id, 1);

        view.set_query("RED");
        assert_eq!(view.filtered_count(), 2);

        view.set_query("2019");
        assert_eq!(view.filtered_count(), 2);
    }

    #[test]
    fn test_full_name() {
        assert_eq!(full_name(Some("Ana"), Some("Diaz")).as_deref(), Some("Ana Diaz"));
        assert_eq!(full_name(None, Some("Diaz")).as_deref(), Some("Diaz"));
        assert_eq!(full_name(None, None), None);
    }
}
