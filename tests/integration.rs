//! End-to-end tests over the public API.
//!
//! These exercise whole documents through [`UrdfLoader`]: parsing,
//! material resolution, mesh callbacks, posing, and world transform
//! propagation together rather than module by module.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use approx::assert_relative_eq;
use nalgebra::Point3;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;
use urdf_scene::{
    Geometry, JointType, JointValue, LinkSource, MeshData, PackageContext, UrdfError, UrdfLoader,
    load_urdf_str,
};

fn triangle() -> MeshData {
    MeshData {
        vertices: vec![
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        indices: vec![[0, 1, 2]],
        normals: None,
    }
}

#[test]
fn test_posed_arm_end_to_end() {
    let urdf = r#"
        <robot name="arm">
            <link name="base"/>
            <link name="forearm"/>
            <joint name="shoulder" type="revolute">
                <origin xyz="0 0 0.3"/>
                <parent link="base"/>
                <child link="forearm"/>
                <axis xyz="0 0 1"/>
                <limit lower="-1.57" upper="1.57"/>
            </joint>
        </robot>
    "#;

    let mut loaded = load_urdf_str(urdf).expect("should load");
    let robot = &mut loaded.robot;
    assert_eq!(
        robot.joint("shoulder").unwrap().angle(),
        JointValue::Scalar(0.0)
    );

    // Request past the upper limit; the stored angle clamps.
    let applied = robot.set_joint_offset("shoulder", &[3.14]).expect("joint exists");
    assert_eq!(applied, JointValue::Scalar(1.57));
    let shoulder = robot.joint("shoulder").unwrap();
    assert_eq!(shoulder.angle().as_scalar(), Some(1.57));

    robot.update_world_transforms();
    let forearm = robot.link("forearm").unwrap();
    let world = forearm.frame.world_isometry();
    assert_relative_eq!(world.translation.vector.z, 0.3, epsilon = 1e-10);
    assert_relative_eq!(world.rotation.angle(), 1.57, epsilon = 1e-10);

    // Posing is idempotent: repeating the same request changes nothing.
    robot.set_joint_offset("shoulder", &[3.14]);
    robot.update_world_transforms();
    let again = robot.link("forearm").unwrap().frame.world_isometry();
    assert_relative_eq!(again.rotation.angle(), 1.57, epsilon = 1e-10);
}

#[test]
fn test_prismatic_chain() {
    let urdf = r#"
        <robot name="slider">
            <link name="rail"/>
            <link name="carriage"/>
            <joint name="slide" type="prismatic">
                <origin xyz="0 0 0.05"/>
                <parent link="rail"/>
                <child link="carriage"/>
                <axis xyz="1 0 0"/>
                <limit lower="0" upper="0.8"/>
            </joint>
        </robot>
    "#;

    let mut loaded = load_urdf_str(urdf).expect("should load");
    let robot = &mut loaded.robot;

    robot.set_joint_offset("slide", &[0.5]);
    robot.update_world_transforms();
    let carriage = robot.link("carriage").unwrap().frame.world_isometry();
    assert_relative_eq!(carriage.translation.vector.x, 0.5, epsilon = 1e-10);
    assert_relative_eq!(carriage.translation.vector.z, 0.05, epsilon = 1e-10);

    // Below the lower limit clamps back to the rest position.
    robot.set_joint_offset("slide", &[-1.0]);
    robot.update_world_transforms();
    let carriage = robot.link("carriage").unwrap().frame.world_isometry();
    assert_relative_eq!(carriage.translation.vector.x, 0.0, epsilon = 1e-10);
}

#[test]
fn test_full_document() {
    let urdf = r#"
        <robot name="rover">
            <material name="chassis_gray">
                <color rgba="0.4 0.4 0.4 1"/>
            </material>

            <link name="chassis">
                <visual>
                    <geometry><box size="0.6 0.4 0.2"/></geometry>
                    <material name="chassis_gray"/>
                </visual>
            </link>

            <link name="wheel_left">
                <visual>
                    <origin rpy="1.5707963267948966 0 0"/>
                    <geometry><cylinder radius="0.1" length="0.05"/></geometry>
                </visual>
            </link>

            <link name="antenna">
                <visual>
                    <geometry>
                        <mesh filename="package://rover_description/meshes/antenna.dae"/>
                    </geometry>
                    <material>
                        <color rgba="1 1 1 0.25"/>
                    </material>
                </visual>
            </link>

            <joint name="wheel_left_hub" type="continuous">
                <origin xyz="0 0.25 0"/>
                <parent link="chassis"/>
                <child link="wheel_left"/>
                <axis xyz="0 1 0"/>
            </joint>

            <joint name="antenna_mount" type="fixed">
                <origin xyz="-0.2 0 0.15"/>
                <parent link="chassis"/>
                <child link="antenna"/>
            </joint>
        </robot>
    "#;

    let loader = UrdfLoader::new()
        .with_packages("/opt/ros/share")
        .with_mesh_loader(|_, _| Ok(triangle()));
    let loaded = loader.load_str(urdf).expect("should load");
    let robot = &loaded.robot;

    assert_eq!(robot.name, "rover");
    assert_eq!(robot.link_count(), 3);
    assert_eq!(robot.joint_count(), 2);
    assert_eq!(robot.roots().len(), 1);
    assert_eq!(robot.root().unwrap().name, "chassis");

    // Primitive attachments carry their resolved materials.
    let chassis = robot.link("chassis").unwrap();
    assert_eq!(chassis.attachments.len(), 1);
    let material = &chassis.attachments[0].material;
    assert_eq!(material.color, Some([0.4, 0.4, 0.4, 1.0]));
    assert!(!material.is_transparent());

    // The mesh went through the callback and kept its inline material.
    assert_eq!(loaded.meshes.requested, 1);
    assert_eq!(loaded.meshes.attached, 1);
    assert_eq!(loaded.meshes.failed, 0);
    let antenna = robot.link("antenna").unwrap();
    assert_eq!(antenna.attachments.len(), 1);
    match &antenna.attachments[0].geometry {
        Geometry::Mesh { path, data } => {
            assert_eq!(path, "/opt/ros/share/rover_description/meshes/antenna.dae");
            assert_eq!(data.vertex_count(), 3);
        }
        other => panic!("expected a mesh, got {other:?}"),
    }
    assert!(antenna.attachments[0].material.is_transparent());

    // A continuous joint without limits spins freely.
    let mut robot = loaded.robot.clone();
    robot.set_joint_offset("wheel_left_hub", &[12.0]);
    assert_eq!(
        robot.joint("wheel_left_hub").unwrap().angle().as_scalar(),
        Some(12.0)
    );
}

#[test]
fn test_mixed_mesh_report() {
    let urdf = r#"
        <robot name="m">
            <link name="a">
                <visual>
                    <geometry><mesh filename="package://pkg/ok.stl"/></geometry>
                </visual>
                <visual>
                    <geometry><mesh filename="package://pkg/bad.obj"/></geometry>
                </visual>
            </link>
        </robot>
    "#;

    let loader = UrdfLoader::new()
        .with_packages("/data")
        .with_mesh_loader(|_, ext| {
            if ext == "stl" {
                Ok(triangle())
            } else {
                Err("unsupported format".into())
            }
        });
    let loaded = loader.load_str(urdf).expect("load should succeed");

    assert_eq!(loaded.meshes.requested, 2);
    assert_eq!(loaded.meshes.attached, 1);
    assert_eq!(loaded.meshes.failed, 1);
    assert_eq!(loaded.robot.link("a").unwrap().attachments.len(), 1);
}

#[test]
fn test_forest_document() {
    let urdf = r#"
        <robot name="pair">
            <link name="left_base"/>
            <link name="left_tip"/>
            <link name="right_base"/>
            <joint name="left" type="fixed">
                <parent link="left_base"/>
                <child link="left_tip"/>
            </joint>
        </robot>
    "#;

    let loaded = load_urdf_str(urdf).expect("should load");
    let roots = loaded.robot.roots();
    assert_eq!(roots.len(), 2);
    let names: Vec<&str> = roots
        .iter()
        .map(|&id| loaded.robot.link_by_id(id).unwrap().name.as_str())
        .collect();
    assert_eq!(names, vec!["left_base", "right_base"]);
}

#[test]
fn test_collision_source() {
    let urdf = r#"
        <robot name="c">
            <link name="body">
                <visual>
                    <geometry><sphere radius="1"/></geometry>
                </visual>
                <collision>
                    <geometry><box size="2 2 2"/></geometry>
                </collision>
            </link>
        </robot>
    "#;

    let loader = UrdfLoader::new().with_link_source(LinkSource::Collision);
    let loaded = loader.load_str(urdf).expect("should load");
    let body = loaded.robot.link("body").unwrap();
    assert_eq!(body.attachments.len(), 1);
    assert!(matches!(
        body.attachments[0].geometry,
        Geometry::Box { size } if size.x == 2.0
    ));
}

#[test]
fn test_strict_names() {
    let urdf = r#"
        <robot name="s">
            <link name="a"/>
            <link name="b"/>
            <link name="c"/>
            <joint name="j" type="fixed"><parent link="a"/><child link="b"/></joint>
            <joint name="j" type="fixed"><parent link="a"/><child link="c"/></joint>
        </robot>
    "#;

    // Lenient by default: last joint wins the name.
    let loaded = load_urdf_str(urdf).expect("should load");
    assert_eq!(loaded.robot.joint_count(), 2);

    let strict = UrdfLoader::new().with_strict_names(true);
    let err = strict.load_str(urdf).unwrap_err();
    assert!(matches!(err, UrdfError::DuplicateJoint(name) if name == "j"));
}

#[test]
fn test_planar_joint_parses_but_does_not_pose() {
    let urdf = r#"
        <robot name="p">
            <link name="ground"/>
            <link name="puck"/>
            <joint name="glide" type="planar">
                <parent link="ground"/>
                <child link="puck"/>
            </joint>
        </robot>
    "#;

    let mut loaded = load_urdf_str(urdf).expect("should load");
    let robot = &mut loaded.robot;
    assert_eq!(robot.joint("glide").unwrap().kind(), JointType::Planar);

    let before = robot.joint("glide").unwrap().frame.clone();
    robot.set_joint_offset("glide", &[0.5, 0.5]);
    let after = robot.joint("glide").unwrap();
    assert_eq!(after.frame.position, before.position);
    assert_eq!(after.frame.rotation, before.rotation);
}

#[test]
fn test_load_file_derives_working_path() {
    let dir = tempdir().expect("tempdir");
    let urdf_path = dir.path().join("robot.urdf");
    std::fs::write(
        &urdf_path,
        r#"
        <robot name="disk">
            <link name="base">
                <visual>
                    <geometry><mesh filename="meshes/part.stl"/></geometry>
                </visual>
            </link>
        </robot>
    "#,
    )
    .expect("write URDF");

    let seen: Arc<Mutex<Vec<String>>> = Arc::default();
    let record = Arc::clone(&seen);
    let loader = UrdfLoader::new().with_mesh_loader(move |path, _| {
        record.lock().unwrap().push(path.to_owned());
        Ok(MeshData::default())
    });

    let loaded = loader.load_file(&urdf_path).expect("should load");
    assert_eq!(loaded.robot.name, "disk");
    assert_eq!(loaded.meshes.attached, 1);

    let expected = format!("{}/meshes/part.stl", dir.path().display());
    assert_eq!(*seen.lock().unwrap(), vec![expected]);
}

#[test]
fn test_package_map_resolution_end_to_end() {
    let urdf = r#"
        <robot name="mapper">
            <link name="a">
                <visual>
                    <geometry><mesh filename="package://arm_description/mesh.stl"/></geometry>
                </visual>
            </link>
            <link name="b">
                <visual>
                    <geometry><mesh filename="package://missing_pkg/mesh.stl"/></geometry>
                </visual>
            </link>
        </robot>
    "#;

    let packages: std::collections::HashMap<String, String> =
        [("arm_description".to_owned(), "/robots/arm".to_owned())].into();
    let seen: Arc<Mutex<Vec<String>>> = Arc::default();
    let record = Arc::clone(&seen);
    let loader = UrdfLoader::new()
        .with_packages(PackageContext::Map(packages))
        .with_mesh_loader(move |path, _| {
            record.lock().unwrap().push(path.to_owned());
            Ok(MeshData::default())
        });

    let loaded = loader.load_str(urdf).expect("should load");

    // The unmapped package was dropped at parse time, not counted as a
    // failed load.
    assert_eq!(loaded.meshes.requested, 1);
    assert_eq!(loaded.meshes.attached, 1);
    assert_eq!(*seen.lock().unwrap(), vec!["/robots/arm/mesh.stl".to_owned()]);
}
