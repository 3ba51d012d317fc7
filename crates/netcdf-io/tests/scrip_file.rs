//! Round trips through real netCDF files on disk.

use netcdf_io::{
    read_grid, read_mask, read_scrip, write_scrip, GlobalAttributes, NetCdfError, VariableNames,
};
use scrip_grid::{GridConvention, ScripConfig, ScripPipeline};
use test_utils::{
    reference_mask, reference_ocean_grid, regular_atmosphere_grid, stacked_indicator,
    temp_test_dir, NativeArray, SyntheticGrid,
};

fn put_native(file: &mut netcdf::FileMut, name: &str, dims: &[&str], array: &NativeArray) {
    let mut var = file.add_variable::<f64>(name, dims).unwrap();
    var.put_values(&array.data[..], ..).unwrap();
}

/// Writes a grid the way NEMO does, with a leading record axis.
fn write_mesh_mask(path: &std::path::Path, grid: &SyntheticGrid, with_metrics: bool) {
    let mut file = netcdf::create(path).unwrap();
    file.add_dimension("t", 1).unwrap();
    file.add_dimension("y", grid.ny).unwrap();
    file.add_dimension("x", grid.nx).unwrap();
    file.add_dimension("z", 2).unwrap();

    let dims = ["t", "y", "x"];
    put_native(&mut file, "glamt", &dims, &grid.center_lon);
    put_native(&mut file, "gphit", &dims, &grid.center_lat);
    put_native(&mut file, "glamf", &dims, &grid.corner_lon);
    put_native(&mut file, "gphif", &dims, &grid.corner_lat);
    if with_metrics {
        put_native(&mut file, "e1t", &dims, &grid.e1);
        put_native(&mut file, "e2t", &dims, &grid.e2);
    }

    let mask = stacked_indicator(&reference_mask(), 2);
    let mut var = file
        .add_variable::<f64>("tmask", &["t", "z", "y", "x"])
        .unwrap();
    var.put_values(&mask[..], ..).unwrap();
}

#[test]
fn test_ocean_mesh_mask_to_scrip() {
    let dir = temp_test_dir();
    let input = dir.path().join("mesh_mask.nc");
    let output = dir.path().join("scrip.nc");
    let grid = reference_ocean_grid();
    write_mesh_mask(&input, &grid, true);

    let names = VariableNames::ocean();
    let inputs = read_grid(&input, &names, GridConvention::Ocean)
        .unwrap()
        .with_mask(read_mask(&input, &names).unwrap());
    assert!(inputs.metrics.is_some());
    assert_eq!(inputs.mask.as_ref().unwrap().shape(), &[2, 3, 4]);

    let record = ScripPipeline::default().run(&inputs).unwrap();
    let attributes = GlobalAttributes::default().with_source("mesh_mask.nc mesh_mask.nc");
    write_scrip(&output, &record, &attributes).unwrap();

    let back = read_scrip(&output).unwrap();
    assert_eq!(back, record);
    assert_eq!(back.grid_dims(), [4, 3]);
    // land cell (x=2, y=1)
    assert_eq!(back.imask.iter().filter(|&&v| v == 0).count(), 1);
    assert_eq!(back.imask[2 * 3 + 1], 0);
}

#[test]
fn test_scrip_file_layout() {
    let dir = temp_test_dir();
    let input = dir.path().join("mesh_mask.nc");
    let output = dir.path().join("scrip.nc");
    write_mesh_mask(&input, &reference_ocean_grid(), false);

    let inputs = read_grid(&input, &VariableNames::ocean(), GridConvention::Ocean).unwrap();
    assert!(inputs.metrics.is_none());

    let config = ScripConfig {
        uniform_area_fallback: false,
        ..ScripConfig::default()
    };
    let record = ScripPipeline::new(config).run(&inputs).unwrap();
    write_scrip(&output, &record, &GlobalAttributes::default()).unwrap();

    let file = netcdf::open(&output).unwrap();
    assert_eq!(file.dimension("grid_size").unwrap().len(), 12);
    assert_eq!(file.dimension("grid_rank").unwrap().len(), 2);
    assert_eq!(file.dimension("grid_corners").unwrap().len(), 4);
    assert!(file.variable("grid_area").is_none());

    let corner_lat = file.variable("grid_corner_lat").unwrap();
    let dims: Vec<usize> = corner_lat.dimensions().iter().map(|d| d.len()).collect();
    assert_eq!(dims, vec![12, 4]);

    let units = corner_lat.attribute_value("units").unwrap().unwrap();
    assert!(matches!(units, netcdf::AttributeValue::Str(ref s) if s == "rad"));

    let center_lon = file.variable("grid_center_lon").unwrap();
    let long_name = center_lon.attribute_value("long_name").unwrap().unwrap();
    assert!(matches!(long_name, netcdf::AttributeValue::Str(ref s) if s == "lonitude"));
    let bounds = center_lon.attribute_value("bounds").unwrap().unwrap();
    assert!(matches!(bounds, netcdf::AttributeValue::Str(ref s) if s == "grid_corner_lon"));

    let imask = file.variable("grid_imask").unwrap();
    let standard_name = imask.attribute_value("standard_name").unwrap().unwrap();
    assert!(matches!(standard_name, netcdf::AttributeValue::Str(ref s) if s == "sea_binary_imask"));

    let conventions = file.attribute("Conventions").unwrap().value().unwrap();
    assert!(matches!(conventions, netcdf::AttributeValue::Str(ref s) if s == "CF-1.0"));
    assert!(file.attribute("creation_date").is_some());
    assert!(file.attribute("institution").is_none());
}

#[test]
fn test_wrf_geo_file_is_aligned() {
    let dir = temp_test_dir();
    let input = dir.path().join("geo_em.d01.nc");
    let grid = regular_atmosphere_grid(5, 4, 10.0, 40.0, 1.0, 1.0);
    {
        let mut file = netcdf::create(&input).unwrap();
        file.add_dimension("Time", 1).unwrap();
        file.add_dimension("south_north", 4).unwrap();
        file.add_dimension("west_east", 5).unwrap();
        file.add_dimension("south_north_stag", 5).unwrap();
        file.add_dimension("west_east_stag", 6).unwrap();
        put_native(&mut file, "XLONG_M", &["Time", "south_north", "west_east"], &grid.center_lon);
        put_native(&mut file, "XLAT_M", &["Time", "south_north", "west_east"], &grid.center_lat);
        put_native(&mut file, "XLONG_U", &["Time", "south_north", "west_east_stag"], &grid.corner_lon);
        put_native(&mut file, "XLAT_V", &["Time", "south_north_stag", "west_east"], &grid.corner_lat);
    }

    let inputs = read_grid(&input, &VariableNames::atmosphere(), GridConvention::Atmosphere).unwrap();
    assert_eq!(inputs.corner_lon.shape(), (4, 5));
    assert_eq!(inputs.corner_lat.shape(), (4, 5));
    // first stored U point is now the east face of cell 0
    assert_eq!(inputs.corner_lon.get(0, 0), 10.5);

    let record = ScripPipeline::new(ScripConfig::for_convention(GridConvention::Atmosphere))
        .run(&inputs)
        .unwrap();
    let [_, _, lower_left, _] = record.cell_corners(1, 0);
    // south edge extrapolated one cell below the first V row
    assert!((lower_left.1 - 39.5f64.to_radians()).abs() < 1e-12);
}

#[test]
fn test_missing_variable_reported() {
    let dir = temp_test_dir();
    let input = dir.path().join("empty.nc");
    {
        let mut file = netcdf::create(&input).unwrap();
        file.add_dimension("x", 2).unwrap();
    }

    let err = read_grid(&input, &VariableNames::ocean(), GridConvention::Ocean).unwrap_err();
    assert!(matches!(err, NetCdfError::MissingData(_)));
    assert!(err.to_string().contains("glamt"));
}

#[test]
fn test_real_nemo_mesh_mask() {
    let path = test_utils::require_test_file!("mesh_mask.nc");
    let names = VariableNames::ocean();
    let inputs = read_grid(&path, &names, GridConvention::Ocean).unwrap();
    let record = ScripPipeline::default().run(&inputs).unwrap();
    assert_eq!(record.grid_size(), inputs.shape().size());
    assert!(record.corner_lat.iter().all(|v| v.is_finite()));
}
