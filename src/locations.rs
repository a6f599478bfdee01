//! Static location catalog served by `/locations`. Sample data, not
//! derived from the model or any database.

pub const LOCATIONS: [&str; 31] = [
    "Urban-Mumbai",
    "Urban-Delhi",
    "Urban-Bangalore",
    "Urban-Hyderabad",
    "Urban-Chennai",
    "Urban-Kolkata",
    "Urban-Ahmedabad",
    "Urban-Pune",
    "Urban-Lucknow",
    "Urban-Patna",
    "Urban-Nagpur",
    "Urban-Guwahati",
    "Semi-Urban-Pune",
    "Semi-Urban-Jaipur",
    "Semi-Urban-Surat",
    "Semi-Urban-Indore",
    "Semi-Urban-Bhopal",
    "Semi-Urban-Chandigarh",
    "Semi-Urban-Coimbatore",
    "Semi-Urban-Dehradun",
    "Rural-Bihar",
    "Rural-Punjab",
    "Rural-Uttar Pradesh",
    "Rural-Madhya Pradesh",
    "Rural-Kerala",
    "Rural-Tamil Nadu",
    "Rural-Gujarat",
    "Rural-Rajasthan",
    "Rural-Haryana",
    "Rural-Assam",
    "Rural-Jharkhand",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_31_unique_entries() {
        assert_eq!(LOCATIONS.len(), 31);
        let unique: HashSet<&str> = LOCATIONS.iter().copied().collect();
        assert_eq!(unique.len(), LOCATIONS.len());
    }

    #[test]
    fn catalog_order_is_fixed() {
        assert_eq!(LOCATIONS[0], "Urban-Mumbai");
        assert_eq!(LOCATIONS[20], "Rural-Bihar");
        assert_eq!(LOCATIONS[30], "Rural-Jharkhand");
    }
}
