mod grid_properties;
