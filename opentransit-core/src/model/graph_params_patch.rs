use chrono::NaiveDate;

/// a partial update of [`super::GraphParams`]. the outer `Option` says
/// whether the field is updated, the inner one is the new (possibly cleared)
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphParamsPatch {
    pub agency_id: Option<Option<String>>,
    pub route_id: Option<Option<String>>,
    pub direction_id: Option<Option<String>>,
    pub start_stop_id: Option<Option<String>>,
    pub end_stop_id: Option<Option<String>>,
    pub date: Option<Option<NaiveDate>>,
    pub start_time: Option<Option<String>>,
    pub end_time: Option<Option<String>>,
}

impl GraphParamsPatch {
    pub fn is_empty(&self) -> bool {
        self == &GraphParamsPatch::default()
    }

    pub fn set_agency_id(mut self, value: Option<String>) -> Self {
        self.agency_id = Some(value);
        self
    }

    pub fn set_route_id(mut self, value: Option<String>) -> Self {
        self.route_id = Some(value);
        self
    }

    pub fn set_direction_id(mut self, value: Option<String>) -> Self {
        self.direction_id = Some(value);
        self
    }

    pub fn set_start_stop_id(mut self, value: Option<String>) -> Self {
        self.start_stop_id = Some(value);
        self
    }

    pub fn set_end_stop_id(mut self, value: Option<String>) -> Self {
        self.end_stop_id = Some(value);
        self
    }

    pub fn set_date(mut self, value: Option<NaiveDate>) -> Self {
        self.date = Some(value);
        self
    }

    pub fn set_time_window(mut self, start_time: Option<String>, end_time: Option<String>) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    /// clears direction and both stops
    pub fn reset_below_route(self) -> Self {
        self.set_direction_id(None).reset_below_direction()
    }

    /// clears both stops
    pub fn reset_below_direction(self) -> Self {
        self.set_start_stop_id(None).set_end_stop_id(None)
    }
}
